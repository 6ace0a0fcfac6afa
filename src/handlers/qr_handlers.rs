use actix_web::{HttpResponse, Result, web};

use crate::models::qr_params::QrRequestParams;
use crate::state::app_state::AppState;
use crate::structs::qr_request::QrQuery;

/// Generate a PNG QR code from the query string
pub async fn generate_qr(
    app_state: web::Data<AppState>,
    web::Query(pairs): web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse> {
    let query = QrQuery::from_pairs(pairs);
    let params = QrRequestParams::from_query(query, app_state.policy).inspect_err(|e| {
        log::debug!("Rejected QR request under {} policy: {}", app_state.policy, e)
    })?;

    log::debug!(
        "Rendering QR code: level {}, micro {}, scale {}, border {}",
        params.error_correction,
        params.micro,
        params.scale,
        params.border
    );
    let png = app_state.renderer.render(&params)?;

    Ok(HttpResponse::Ok().content_type("image/png").body(png))
}
