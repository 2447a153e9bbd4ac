//! Tooltip Route
//!
//! POST /api/v1/tooltip - Turn a chart hover payload into a render description

use axum::Json;

use crate::api::dto::{TooltipRequest, TooltipResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::dashboard::render_tooltip;

/// POST /api/v1/tooltip
pub async fn render(Json(request): Json<TooltipRequest>) -> ApiResult<Json<TooltipResponse>> {
    let model = &request.tooltip;

    if model.x_padding < 0.0 || model.y_padding < 0.0 {
        return Err(ApiError::Validation(
            "padding must not be negative".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&model.opacity) {
        return Err(ApiError::Validation(format!(
            "opacity must be between 0 and 1, got {}",
            model.opacity
        )));
    }

    let render = render_tooltip(model, request.canvas);

    Ok(Json(TooltipResponse {
        class_list: render.class_list(),
        style: render.style_attr(),
        html: render.to_html(),
        render,
    }))
}
