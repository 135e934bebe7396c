//! Registration surface exported by extension units.
//!
//! An extension unit is a `cdylib` exporting [`REGISTRATION_SYMBOL`], a
//! function returning an [`ExtensionBundle`]: the ordered list of extension
//! constructors declared by that unit. Plugin authors generate the symbol
//! with the `export_extensions!` macro rather than writing it by hand.

use std::fmt;

use confbak_core::AppResult;

use crate::extension::Extension;

/// No-argument constructor for one extension instance.
pub type ExtensionCtor = fn() -> AppResult<Box<dyn Extension>>;

/// Describes one constructible extension inside a unit.
pub struct ExtensionDescriptor {
    construct: ExtensionCtor,
}

impl ExtensionDescriptor {
    /// Creates a descriptor around a constructor.
    pub fn new(construct: ExtensionCtor) -> Self {
        Self { construct }
    }

    /// Instantiates the extension.
    pub fn build(&self) -> AppResult<Box<dyn Extension>> {
        (self.construct)()
    }
}

impl fmt::Debug for ExtensionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionDescriptor")
            .field("construct", &"<fn>")
            .finish()
    }
}

/// Ordered registration bundle returned by an extension unit.
///
/// Declaration order in the bundle is the within-unit discovery order.
#[derive(Debug, Default)]
pub struct ExtensionBundle {
    descriptors: Vec<ExtensionDescriptor>,
}

impl ExtensionBundle {
    /// Creates a bundle from descriptors in declaration order.
    pub fn new(descriptors: Vec<ExtensionDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Appends a descriptor.
    pub fn push(&mut self, descriptor: ExtensionDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Number of declared extensions.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the bundle declares no extensions.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Consumes the bundle, yielding descriptors in declaration order.
    pub fn into_descriptors(self) -> Vec<ExtensionDescriptor> {
        self.descriptors
    }
}

/// Signature of the registration function exported by extension units.
pub type RegisterExtensionsFn = unsafe extern "C" fn() -> *mut ExtensionBundle;

/// Symbol name the loader resolves in each extension unit.
pub const REGISTRATION_SYMBOL: &[u8] = b"confbak_extensions";
