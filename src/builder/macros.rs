//! Macros for declaring state kinds.

/// Declare a fieldless enum and implement `StateKind` for it.
///
/// The enum derives everything a kind needs and `name()` returns the
/// variant identifier. The calling crate must depend on `serde`.
///
/// # Example
///
/// ```
/// use tickstate::core::StateKind;
/// use tickstate::state_kind;
///
/// state_kind! {
///     pub enum PlayerKind {
///         Idle,
///         Walk,
///         Jump,
///     }
/// }
///
/// assert_eq!(PlayerKind::Jump.name(), "Jump");
/// ```
#[macro_export]
macro_rules! state_kind {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateKind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
