/// Declares an enum usable as a symbol-valued scalar.
///
/// Each variant is written in documents as its own name (or as the string
/// given after `=`). The enum gets a `SYMBOLS` table, `as_str`, `Display`
/// and a [`ScalarType`](crate::ScalarType) implementation backed by
/// [`ScalarKind::Symbol`](crate::ScalarKind::Symbol).
///
/// # Examples
///
/// ```rust
/// use easy_markup::{symbols, Property, ScalarKind, ScalarType};
///
/// symbols! {
///     /// Crafting tabs.
///     pub enum Tab {
///         Resources,
///         Tools = "Personal",
///     }
/// }
///
/// assert_eq!(Tab::SYMBOLS, &["Resources", "Personal"]);
/// assert_eq!(Tab::Tools.as_str(), "Personal");
/// assert_eq!(Tab::kind(), ScalarKind::Symbol(Tab::SYMBOLS));
///
/// let mut tab = Property::typed::<Tab>("Tab");
/// tab.parse("Tab:Personal;", false).unwrap();
/// assert_eq!(tab.as_scalar().unwrap().get::<Tab>(), Some(Tab::Tools));
/// assert!(tab.parse("Tab:Tools;", false).is_err());
/// ```
#[macro_export]
macro_rules! symbols {
    (@text $variant:ident = $text:literal) => {
        $text
    };
    (@text $variant:ident) => {
        stringify!($variant)
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident $(= $text:literal)?),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),*
        }

        impl $name {
            /// Every symbol, in declaration order.
            pub const SYMBOLS: &'static [&'static str] =
                &[$($crate::symbols!(@text $variant $(= $text)?)),*];

            /// Returns the symbol this variant is written as.
            pub const fn as_str(&self) -> &'static str {
                match *self {
                    $($name::$variant => $crate::symbols!(@text $variant $(= $text)?)),*
                }
            }

            /// Looks up the variant written as `symbol`.
            pub fn from_symbol(symbol: &str) -> ::std::option::Option<Self> {
                match symbol {
                    $(s if s == $crate::symbols!(@text $variant $(= $text)?) => {
                        ::std::option::Option::Some($name::$variant)
                    })*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::ScalarType for $name {
            fn kind() -> $crate::ScalarKind {
                $crate::ScalarKind::Symbol(Self::SYMBOLS)
            }

            fn from_scalar(value: &$crate::ScalarValue) -> ::std::option::Option<Self> {
                match value {
                    $crate::ScalarValue::Symbol(symbol) => Self::from_symbol(symbol),
                    _ => ::std::option::Option::None,
                }
            }

            fn into_scalar(self) -> $crate::ScalarValue {
                $crate::ScalarValue::Symbol(self.as_str().to_string())
            }
        }
    };
}
