use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method};
use actix_web::HttpResponse;
use futures_util::future::{ready, LocalBoxFuture, Ready};

/// Wildcard CORS for the browser game client.
///
/// Any OPTIONS request short-circuits with 200, an empty body, and the
/// preflight headers; every other response carries
/// `Access-Control-Allow-Origin: *`.
pub struct PermissiveCors;

impl<S, B> Transform<S, ServiceRequest> for PermissiveCors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = PermissiveCorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PermissiveCorsMiddleware { service }))
    }
}

pub struct PermissiveCorsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PermissiveCorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let (req, _payload) = req.into_parts();
            let response = HttpResponse::Ok()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
                .insert_header((
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    "Content-Type, Authorization, X-Authorization",
                ))
                .finish();
            let response = ServiceResponse::new(req, response).map_into_right_body();

            return Box::pin(async move { Ok(response) });
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            res.headers_mut().insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                header::HeaderValue::from_static("*"),
            );
            Ok(res.map_into_left_body())
        })
    }
}
