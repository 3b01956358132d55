use std::fmt::{self, LowerHex};

fn fmt_value<T>(f: &mut fmt::Formatter, value: T) -> fmt::Result
where
    T: Copy + LowerHex,
{
    write!(f, "0x{:0width$x}", value, width = size_of::<T>() * 2)
}

fn fmt_sequence<T>(f: &mut fmt::Formatter, values: &[T]) -> fmt::Result
where
    T: Copy + LowerHex,
{
    write!(f, "[")?;

    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }

        fmt_value(f, *value)?;
    }

    write!(f, "]")
}

macro_rules! impl_hex {
    ($($type:ty),* $(,)?) => {
        $(
            impl fmt::Display for Hex<$type> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    fmt_value(f, self.0)
                }
            }

            impl fmt::Debug for Hex<$type> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    fmt_value(f, self.0)
                }
            }

            impl fmt::Display for Hex<&[$type]> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    fmt_sequence(f, self.0)
                }
            }

            impl fmt::Debug for Hex<&[$type]> {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    fmt_sequence(f, self.0)
                }
            }
        )*
    };
}

/// A hexadecimal representation of a value.
///
/// Values are zero-padded to the full width of their type, so the width of
/// the output tells the reader which field it came from.
///
/// # Examples
///
/// ```
/// # use segdesc_core::Hex;
/// assert_eq!(format!("{}", Hex(42u16)), "0x002a");
/// assert_eq!(format!("{}", Hex(0x00cf9a000000ffffu64)), "0x00cf9a000000ffff");
/// assert_eq!(format!("{}", Hex(&[1u8, 2][..])), "[0x01, 0x02]");
/// ```
pub struct Hex<T>(pub T);

impl_hex!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A 32-bit address split into two 16-bit halves by an underscore.
///
/// # Examples
///
/// ```
/// # use segdesc_core::Hex32Grouped;
/// assert_eq!(Hex32Grouped(0xffff).to_string(), "0x0000_ffff");
/// assert_eq!(Hex32Grouped(0xdeadbeef).to_string(), "0xdead_beef");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Hex32Grouped(pub u32);

impl fmt::Display for Hex32Grouped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:04x}_{:04x}", self.0 >> 16, self.0 & 0xffff)
    }
}

impl fmt::Debug for Hex32Grouped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
