use std::task::{Context, Poll};
use std::time::Instant;

use tonic::codegen::http;
use tower::{Layer, Service};

/// Logs every call with its path and how long it took
#[derive(Debug, Clone, Default)]
pub struct LoggerLayer;

impl<S> Layer<S> for LoggerLayer {
    type Service = Logger<S>;

    fn layer(&self, service: S) -> Self::Service {
        Logger { inner: service }
    }
}

#[derive(Debug, Clone)]
pub struct Logger<S> {
    inner: S,
}

impl<S, B> Service<http::Request<B>> for Logger<S>
where
    S: Service<http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Error = S::Error;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        // This is necessary because tonic internally uses `tower::buffer::Buffer`.
        // See https://github.com/tower-rs/tower/issues/547#issuecomment-767629149
        // for details on why this is necessary
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let path = req.uri().path().to_owned();
        let started = Instant::now();

        Box::pin(async move {
            let response = inner.call(req).await;
            match &response {
                Ok(_) => info!("{} handled in {:?}", path, started.elapsed()),
                Err(_) => warn!("{} failed after {:?}", path, started.elapsed()),
            }
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tower::{service_fn, ServiceExt};

    use super::*;

    #[tokio::test]
    async fn passes_requests_through() {
        let service = LoggerLayer.layer(service_fn(|req: http::Request<()>| async move {
            Ok::<_, Infallible>(req.uri().path().len())
        }));

        let request = http::Request::builder()
            .uri("/mangashelf.Collection/Index")
            .body(())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response, "/mangashelf.Collection/Index".len());
    }
}
