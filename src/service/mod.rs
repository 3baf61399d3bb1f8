pub mod collection;

/// Expose a `server()` constructor for a service implementation
#[macro_export]
macro_rules! export_server {
    ($server:ident, $service:ident) => {
        pub fn server() -> $server<$service> {
            $server::new($service::default())
                .accept_compressed(tonic::codec::CompressionEncoding::Gzip)
                .send_compressed(tonic::codec::CompressionEncoding::Gzip)
        }
    };
}
