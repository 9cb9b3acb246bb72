// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small declarative macros shared by the event and error types.

/// `Display` for a fieldless enum as fixed lowercase words.
///
/// ```ignore
/// crate::simple_display! {
///     MessageImportance {
///         High => "high",
///         Normal => "normal",
///         Low => "low",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant => $str, )+
                })
            }
        }
    };
}

/// Builder for a record made of optional text fields plus a few typed ones,
/// reachable as `Target::builder()` in tests and under `test-support`.
///
/// Every `text` field starts out `None` and its setter takes anything
/// `Into<String>`. Typed fields start at their given default.
///
/// ```ignore
/// crate::builder! {
///     DiagnosticBuilder => Diagnostic {
///         text: [code, file],
///         span: SourceSpan = SourceSpan::default(),
///     }
/// }
///
/// let d = Diagnostic::builder().code("BW0001").span(SourceSpan::at(3, 1)).build();
/// ```
#[macro_export]
macro_rules! builder {
    (
        $builder:ident => $target:ident {
            text: [ $( $text:ident ),* $(,)? ],
            $( $field:ident : $ty:ty = $default:expr ),* $(,)?
        }
    ) => {
        #[cfg(any(test, feature = "test-support"))]
        pub struct $builder {
            $( $text: Option<String>, )*
            $( $field: $ty, )*
        }

        #[cfg(any(test, feature = "test-support"))]
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    $( $text: None, )*
                    $( $field: $default, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $builder {
            $(
                pub fn $text(mut self, v: impl Into<String>) -> Self {
                    self.$text = Some(v.into());
                    self
                }
            )*

            $(
                pub fn $field(mut self, v: $ty) -> Self {
                    self.$field = v;
                    self
                }
            )*

            pub fn build(self) -> $target {
                $target {
                    $( $text: self.$text, )*
                    $( $field: self.$field, )*
                }
            }
        }

        #[cfg(any(test, feature = "test-support"))]
        impl $target {
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    };
}
