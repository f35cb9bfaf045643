use thiserror::Error;

/// Errors from [`crate::geocode::Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The address was empty after trimming.
    #[error("an address is required")]
    EmptyAddress,

    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}
