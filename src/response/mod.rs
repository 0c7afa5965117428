//! Response normalization and the operation result envelope
//!
//! # Error taxonomy
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | `NotFound` | 404 on a single page request |
//! | `Client` / `Server` | other 4xx / any 5xx |
//! | `Connectivity` | host unreachable or timed out |
//! | `Request` | other transport failures |
//! | `Authentication` | token provider failed |
//! | `Decode` | body was not the expected shape |

pub mod normalize;
mod types;

pub use normalize::{
    auth_failure, classify_error, classify_status, error_detail, failure_from_error, normalize,
    not_found_message, RequestTarget, AUTH_PREFIX, CONNECTIVITY_PREFIX, DECODE_PREFIX,
    SUPPORT_MESSAGE,
};
pub use types::{ErrorKind, OperationError, OperationResult};
