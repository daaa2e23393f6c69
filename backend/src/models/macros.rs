/// Defines a fieldless enum whose variants carry a wire name (the serde form)
/// and a human phrase, and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)
/// - `ALL`, `wire_name()`, `phrase()` and a lenient `from_label()`
/// - `Display` (the phrase)
///
/// Usage:
///   define_labelled_enum!(Unit { Day => ("DAY", "day") });
#[macro_export]
macro_rules! define_labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($wire:literal, $phrase:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The serde wire form, e.g. `LAST_15_MINUTES`.
            pub fn wire_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// The human phrase, e.g. `last 15 minutes`.
            pub fn phrase(&self) -> &'static str {
                match self {
                    $($name::$variant => $phrase),+
                }
            }

            /// Matches either the wire name or the phrase, ignoring ASCII case
            /// and repeated whitespace.
            pub fn from_label(label: &str) -> Option<Self> {
                let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
                $name::ALL.iter().copied().find(|v| {
                    v.wire_name().eq_ignore_ascii_case(&normalized)
                        || v.phrase().eq_ignore_ascii_case(&normalized)
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.phrase())
            }
        }
    };
}
