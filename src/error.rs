//! Errors raised by the region geometry core

/// Geometry failures.
///
/// The only failure the core can hit is a division by a zero page dimension,
/// which happens when a gesture or export arrives before any page has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("{operation}: page dimensions are not known yet")]
    UndefinedGeometry { operation: &'static str },
}

impl GeometryError {
    pub fn undefined(operation: &'static str) -> Self {
        Self::UndefinedGeometry { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_operation() {
        let err = GeometryError::undefined("clamp_vertical");
        assert_eq!(
            err.to_string(),
            "clamp_vertical: page dimensions are not known yet"
        );
    }
}
