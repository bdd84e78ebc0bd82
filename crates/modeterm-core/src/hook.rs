use std::fmt;
use std::sync::Arc;

/// A wrappable entry point.
///
/// Holds the original handler and at most one installed wrapper. `install`
/// and `uninstall` are idempotent: the second install is ignored and
/// uninstalling an unwrapped point does nothing.
pub struct HookPoint<H: ?Sized> {
    original: Arc<H>,
    wrapper: Option<Arc<H>>,
}

impl<H: ?Sized> HookPoint<H> {
    pub fn new(original: Arc<H>) -> Self {
        Self {
            original,
            wrapper: None,
        }
    }

    pub fn original(&self) -> Arc<H> {
        Arc::clone(&self.original)
    }

    /// The handler callers should invoke: the wrapper when installed.
    pub fn current(&self) -> Arc<H> {
        Arc::clone(self.wrapper.as_ref().unwrap_or(&self.original))
    }

    pub fn is_installed(&self) -> bool {
        self.wrapper.is_some()
    }

    /// Install a wrapper built around the original handler. Returns `false`
    /// (and does not call `wrap`) when a wrapper is already installed.
    pub fn install(&mut self, wrap: impl FnOnce(Arc<H>) -> Arc<H>) -> bool {
        if self.wrapper.is_some() {
            return false;
        }
        self.wrapper = Some(wrap(self.original()));
        true
    }

    /// Remove the wrapper. Returns `false` when nothing was installed.
    pub fn uninstall(&mut self) -> bool {
        self.wrapper.take().is_some()
    }
}

impl<H: ?Sized> fmt::Debug for HookPoint<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookPoint")
            .field("installed", &self.is_installed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greet: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Plain;
    impl Greet for Plain {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct Loud(Arc<dyn Greet>);
    impl Greet for Loud {
        fn greet(&self) -> String {
            self.0.greet().to_uppercase()
        }
    }

    #[test]
    fn install_is_idempotent() {
        let mut point: HookPoint<dyn Greet> = HookPoint::new(Arc::new(Plain));
        assert!(point.install(|orig| Arc::new(Loud(orig))));
        assert!(!point.install(|_| panic!("second install must not build a wrapper")));
        assert_eq!(point.current().greet(), "HELLO");
        assert_eq!(point.original().greet(), "hello");
    }

    #[test]
    fn uninstall_restores_original() {
        let mut point: HookPoint<dyn Greet> = HookPoint::new(Arc::new(Plain));
        assert!(!point.uninstall());
        point.install(|orig| Arc::new(Loud(orig)));
        assert!(point.uninstall());
        assert!(!point.uninstall());
        assert!(!point.is_installed());
        assert_eq!(point.current().greet(), "hello");
    }
}
