//! Configuration options for inspection.

/// Options for controlling [`inspect_opt`](crate::BlkInspect::inspect_opt).
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Fall back to the `fstat` size when a block device rejects the size request.
    ///
    /// When disabled (default), a failed `BLKGETSIZE64` is returned as
    /// [`Error::ControlRequest`](crate::Error::ControlRequest). When enabled,
    /// the status-reported size is used instead and the result is marked
    /// with `used_fallback`. For most device nodes that size is zero.
    pub allow_fallback: bool,

    /// Fail with [`Error::NotBlockDevice`](crate::Error::NotBlockDevice)
    /// unless the descriptor refers to a block device.
    pub require_block_device: bool,
}

impl Options {
    /// Create a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable fallback to the status-reported size.
    pub fn with_allow_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    /// Enable or disable rejecting descriptors that are not block devices.
    pub fn with_require_block_device(mut self, require: bool) -> Self {
        self.require_block_device = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert!(!opts.allow_fallback);
        assert!(!opts.require_block_device);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = Options::new()
            .with_allow_fallback(true)
            .with_require_block_device(true);

        assert!(opts.allow_fallback);
        assert!(opts.require_block_device);
    }
}
