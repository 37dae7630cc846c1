use rug::integer::Order;
use rug::rand::MutRandState;
use rug::Integer;

pub fn random_between<R: MutRandState>(rng: &mut R, min: &Integer, max: &Integer) -> Integer {
    min + Integer::from(max - min).random_below(rng)
}

/// Little-endian bytes of a non-negative integer, without trailing zeros.
pub fn integer_to_bytes(num: &Integer) -> Vec<u8> {
    num.to_digits::<u8>(Order::Lsf)
}

pub fn bytes_to_integer(bytes: &[u8]) -> Integer {
    Integer::from_digits(bytes, Order::Lsf)
}

pub fn integer_to_hex(num: &Integer) -> String {
    num.to_string_radix(16)
}

/// Parses lowercase or uppercase hex without a prefix. Returns `None` on
/// empty input, a sign, or any non-hex character.
pub fn hex_to_integer(hex: &str) -> Option<Integer> {
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Integer::from_str_radix(hex, 16).ok()
}
