//! Bridges from engine-local errors to the unified [`FixError`].
//!
//! [`FixError`]: closurefix_core::error::FixError

use closurefix_core::error::FixError;

use crate::tree::TreeError;

impl From<TreeError> for FixError {
    fn from(err: TreeError) -> Self {
        FixError::MalformedTree {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_error_maps_to_malformed_tree() {
        let err: FixError = TreeError::Empty.into();
        assert!(matches!(err, FixError::MalformedTree { .. }));
        assert_eq!(err.error_code().code(), 2);
    }
}
