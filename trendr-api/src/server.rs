use std::future::Future;
use std::pin::Pin;

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    http::{
        header::{self, HeaderMap, HeaderValue},
        Method,
    },
    web, App, Error, HttpResponse, HttpServer, Responder,
};
use tracing::info;

use crate::context::ApiContext;
use crate::types::ApiError;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub bind: String,
}

type MiddlewareFuture = Pin<Box<dyn Future<Output = Result<ServiceResponse<BoxBody>, Error>>>>;

async fn trends_handler(ctx: web::Data<ApiContext>) -> Result<impl Responder, ApiError> {
    let records = ctx.get_trends().await?;
    Ok(web::Json(records))
}

async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().finish()
}

// Any origin, method and header is accepted.
fn apply_cors_headers(headers: &mut HeaderMap) {
    let any = HeaderValue::from_static("*");
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any);
}

pub fn build_app(
    ctx: ApiContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap_fn(|req, srv| {
            if req.method() == Method::OPTIONS {
                let mut preflight = HttpResponse::NoContent().finish();
                apply_cors_headers(preflight.headers_mut());
                let response = req.into_response(preflight);
                return Box::pin(async { Ok(response) }) as MiddlewareFuture;
            }

            let fut = srv.call(req);
            Box::pin(async move {
                let mut response = fut.await?;
                apply_cors_headers(response.headers_mut());
                Ok(response)
            }) as MiddlewareFuture
        })
        .app_data(web::Data::new(ctx))
        .route("/api/trends", web::get().to(trends_handler))
        .route("/health", web::get().to(health_handler))
}

pub async fn run_server(ctx: ApiContext, config: ApiConfig) -> std::io::Result<()> {
    info!(bind = %config.bind, "starting api server");
    HttpServer::new(move || build_app(ctx.clone()))
        .bind(&config.bind)?
        .run()
        .await
}
