//! Convenience macros for extension authors.

/// Exports the registration symbol for an extension unit.
///
/// Takes one constructor expression per extension, in declaration order;
/// that order is preserved when the unit is discovered by the loader.
///
/// ```rust,ignore
/// confbak_plugin::export_extensions![NotifyExtension::new(), AuditExtension::default()];
/// ```
#[macro_export]
macro_rules! export_extensions {
    ($($ctor:expr),+ $(,)?) => {
        #[unsafe(no_mangle)]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn confbak_extensions() -> *mut $crate::exports::ExtensionBundle {
            let bundle = $crate::exports::ExtensionBundle::new(vec![
                $(
                    $crate::exports::ExtensionDescriptor::new(|| {
                        Ok(Box::new($ctor) as Box<dyn $crate::extension::Extension>)
                    })
                ),+
            ]);
            Box::into_raw(Box::new(bundle))
        }
    };
}
