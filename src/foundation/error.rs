/// Crate-wide result alias.
pub type RingdriftResult<T> = Result<T, RingdriftError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum RingdriftError {
    /// A definition failed validation before any frame was produced.
    #[error("validation error: {0}")]
    Validation(String),

    /// Drift/easing state was misused (bad smoothing constant, non-finite target).
    #[error("animation error: {0}")]
    Animation(String),

    /// The drawable surface could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else (IO, encoding), preserved with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RingdriftError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RingdriftError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            RingdriftError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            RingdriftError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = RingdriftError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
