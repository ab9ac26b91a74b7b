pub const SIGMA: usize = 6; // {0:NUL, 1:A, 2:C, 3:G, 4:T, 5:other}

/// 滚动哈希使用的符号编码。A/C/G/T 从 1 开始，避免前导符号与 0 混淆；
/// 其余字节统一编码为 5，由调用方逐字符校验区分。
#[inline]
pub fn to_alphabet(b: u8) -> u8 {
    if b == 0 { return 0; }
    match b.to_ascii_uppercase() {
        b'A' => 1,
        b'C' => 2,
        b'G' => 3,
        b'T' => 4,
        _ => 5,
    }
}

#[inline]
pub fn is_base(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// 原地转为大写（仅 ASCII）
pub fn normalize_seq(seq: &mut [u8]) {
    seq.make_ascii_uppercase();
}

/// 返回第一个不属于 {A,C,G,T} 的字节及其位置（0-based）。序列需已大写。
pub fn find_invalid_base(seq: &[u8]) -> Option<(usize, u8)> {
    seq.iter().position(|&b| !is_base(b)).map(|i| (i, seq[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_codes() {
        assert_eq!(to_alphabet(b'a'), 1);
        assert_eq!(to_alphabet(b'T'), 4);
        assert_eq!(to_alphabet(b'N'), 5);
        assert_eq!(to_alphabet(b'x'), 5);
        assert_eq!(to_alphabet(0), 0);
        assert!((to_alphabet(b'G') as usize) < SIGMA);
    }

    #[test]
    fn normalize_and_validate() {
        let mut seq = b"acgTn".to_vec();
        normalize_seq(&mut seq);
        assert_eq!(seq, b"ACGTN");
        assert_eq!(find_invalid_base(&seq), Some((4, b'N')));
        assert_eq!(find_invalid_base(b"ACGT"), None);
        assert_eq!(find_invalid_base(b""), None);
    }
}
