//! HTTP inbound adapter exposing the echo endpoints.
//!
//! ```text
//! GET  /items/
//! GET  /search/
//! POST /users/
//! GET  /validate/
//! POST /reports/{report_id}
//! ```

pub mod error;
pub mod extract;
pub mod health;
pub mod items;
pub mod params;
pub mod reports;
pub mod search;
pub mod users;
pub mod validate;

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::domain::{ApiResult, Error};

/// Echo routes paired with the single method each accepts.
const ECHO_ROUTES: [(&str, &str); 5] = [
    ("/items/", "GET"),
    ("/search/", "GET"),
    ("/users/", "POST"),
    ("/validate/", "GET"),
    ("/reports/{report_id}", "POST"),
];

/// Register the echo endpoints and their fallbacks.
///
/// A known path hit with the wrong method answers 405 with an `Allow`
/// header. A collection path missing its trailing slash is redirected with
/// 307 so the method and body are replayed. Anything else is a JSON 404.
/// Health probes are registered separately because they need shared
/// [`health::HealthState`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use param_echo::Trace;
/// use param_echo::inbound::http::configure;
///
/// let app = App::new().wrap(Trace).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(items::read_items)
        .service(search::search)
        .service(users::create_user)
        .service(validate::validate_username)
        .service(reports::submit_report);

    for (path, allow) in ECHO_ROUTES {
        cfg.service(
            web::resource(path).to(move |req: HttpRequest| method_not_allowed(req, allow)),
        );
        if let Some(bare) = path.strip_suffix('/') {
            cfg.service(web::resource(bare).to(redirect_with_slash));
        }
    }

    cfg.default_service(web::to(not_found));
}

async fn method_not_allowed(req: HttpRequest, allow: &'static str) -> HttpResponse {
    let error = Error::method_not_allowed(format!(
        "method {} is not allowed on {}; use {allow}",
        req.method(),
        req.path()
    ));
    let mut response = error.error_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

async fn redirect_with_slash(req: HttpRequest) -> HttpResponse {
    let location = match req.query_string() {
        "" => format!("{}/", req.path()),
        query => format!("{}/?{query}", req.path()),
    };
    HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn not_found(req: HttpRequest) -> ApiResult<web::Json<()>> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}
