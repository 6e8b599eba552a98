pub mod capabilities;
pub mod registry;

pub use capabilities::*;
pub use registry::{ModuleManager, ModuleRegistry};

/// Identity shared by every module, whatever capabilities it implements.
pub trait Module: Send + Sync {
    fn name(&self) -> &str;
}

/// Marker implemented by each capability trait object type (`dyn RecognizeMedia`, ...).
///
/// `NAME` is the operation name the facade exposes and the key modules are
/// registered under.
pub trait Capability: Module + 'static {
    const NAME: &'static str;
}
