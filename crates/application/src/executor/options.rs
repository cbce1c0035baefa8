//! Per-call options

use std::fmt;

use apiprobe_domain::RequestSpec;

/// Hook run once, immediately before the request is sent.
pub type PreSendHook<'a> = Box<dyn FnOnce(&mut RequestSpec) + Send + 'a>;

/// Options for a single call.
///
/// By default the call asserts a 2xx status and has no pre-send hook.
pub struct CallOptions<'a> {
    pub(crate) ensure_success: bool,
    pub(crate) pre_send: Option<PreSendHook<'a>>,
}

impl<'a> CallOptions<'a> {
    /// Default options: assert success, no hook.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ensure_success: true,
            pre_send: None,
        }
    }

    /// Do not assert the status; the caller inspects the response instead.
    #[must_use]
    pub fn allow_failure() -> Self {
        Self::new().ensure_success(false)
    }

    /// Sets whether a non-2xx status fails the call.
    #[must_use]
    pub fn ensure_success(mut self, ensure: bool) -> Self {
        self.ensure_success = ensure;
        self
    }

    /// Customizes this call only, e.g. to add a one-off header.
    #[must_use]
    pub fn before_send(mut self, hook: impl FnOnce(&mut RequestSpec) + Send + 'a) -> Self {
        self.pre_send = Some(Box::new(hook));
        self
    }
}

impl Default for CallOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("ensure_success", &self.ensure_success)
            .field("pre_send", &self.pre_send.is_some())
            .finish()
    }
}
