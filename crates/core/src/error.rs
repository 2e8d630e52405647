use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure taxonomy for calls against the Supabase management API.
///
/// Variants are produced only at the gateway boundary; downstream code matches
/// on them to pick a transport response and never re-inspects payload shape.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The API answered with a non-2xx status.
    #[error("Supabase API returned status {status}")]
    Upstream {
        status: u16,
        /// Decoded response body, or the raw text as a JSON string when the
        /// body is not valid JSON.
        body: serde_json::Value,
    },

    /// The request went out but no response came back.
    #[error("no response from the Supabase API")]
    Unreachable,

    /// A local fault while building the client or decoding a response.
    #[error("gateway client fault: {0}")]
    Fault(String),
}
