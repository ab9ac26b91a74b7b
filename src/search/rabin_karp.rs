use crate::util::dna;

/// Mersenne 素数 2^61 - 1，乘法用 u128 防溢出
pub const MODULUS: u64 = (1u64 << 61) - 1;
pub const BASE: u64 = dna::SIGMA as u64;

#[inline]
fn mul_mod(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % MODULUS as u128) as u64
}

#[inline]
fn code(b: u8) -> u64 {
    dna::to_alphabet(b) as u64
}

/// Polynomial hash of `window`, most significant symbol first.
pub fn hash_window(window: &[u8]) -> u64 {
    window.iter().fold(0u64, |h, &b| (mul_mod(h, BASE) + code(b)) % MODULUS)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RkHits {
    pub offsets: Vec<usize>,
    /// 哈希相等但逐字符校验失败的窗口数
    pub collisions: u64,
}

/// Rabin-Karp matcher. Every hash hit is verified byte by byte before it is
/// reported, so results never depend on the hash being collision free.
#[derive(Debug, Clone)]
pub struct RabinKarp {
    pattern: Vec<u8>,
    pattern_hash: u64,
    /// BASE^(m-1) mod MODULUS，用于移出窗口首字符
    high_pow: u64,
}

impl RabinKarp {
    pub fn new(pattern: &[u8]) -> Self {
        let high_pow = (1..pattern.len()).fold(1u64, |p, _| mul_mod(p, BASE));
        Self { pattern: pattern.to_vec(), pattern_hash: hash_window(pattern), high_pow }
    }

    pub fn find_all(&self, text: &[u8]) -> RkHits {
        let m = self.pattern.len();
        let n = text.len();
        let mut hits = RkHits::default();
        if m == 0 || m > n {
            return hits;
        }

        let mut h = hash_window(&text[..m]);
        for i in 0..=n - m {
            if h == self.pattern_hash {
                if text[i..i + m] == self.pattern[..] {
                    hits.offsets.push(i);
                } else {
                    hits.collisions += 1;
                }
            }
            if i < n - m {
                let out = mul_mod(code(text[i]), self.high_pow);
                h = (h + MODULUS - out) % MODULUS;
                h = (mul_mod(h, BASE) + code(text[i + m])) % MODULUS;
            }
        }
        hits
    }
}

pub fn rabin_karp_search(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    RabinKarp::new(pattern).find_all(text).offsets
}
