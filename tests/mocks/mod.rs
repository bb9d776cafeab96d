//! Hand-written collaborator doubles shared by the integration tests.

pub mod mock_dns_resolver;
pub mod mock_geocoder;
pub mod mock_http_probe;
pub mod mock_store;

#[allow(unused_imports)]
pub use mock_dns_resolver::MockDnsResolver;
#[allow(unused_imports)]
pub use mock_geocoder::MockGeocoder;
#[allow(unused_imports)]
pub use mock_http_probe::MockHttpProbe;
#[allow(unused_imports)]
pub use mock_store::MockStore;
