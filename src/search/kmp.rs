/// KMP 失配函数：fail[i] 为 pattern[..=i] 最长的真前缀兼后缀长度
pub fn failure_function(pattern: &[u8]) -> Vec<usize> {
    let mut fail = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = fail[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        fail[i] = k;
    }
    fail
}

/// Knuth-Morris-Pratt matcher with the failure table built once per pattern.
#[derive(Debug, Clone)]
pub struct Kmp {
    pattern: Vec<u8>,
    fail: Vec<usize>,
}

impl Kmp {
    pub fn new(pattern: &[u8]) -> Self {
        Self { pattern: pattern.to_vec(), fail: failure_function(pattern) }
    }

    /// All 0-based start offsets of the pattern in `text`, ascending,
    /// overlapping occurrences included. O(n + m).
    pub fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let m = self.pattern.len();
        let mut hits = Vec::new();
        if m == 0 || m > text.len() {
            return hits;
        }

        let mut k = 0usize;
        for (i, &b) in text.iter().enumerate() {
            while k > 0 && b != self.pattern[k] {
                k = self.fail[k - 1];
            }
            if b == self.pattern[k] {
                k += 1;
            }
            if k == m {
                hits.push(i + 1 - m);
                k = self.fail[m - 1];
            }
        }
        hits
    }
}

pub fn kmp_search(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    Kmp::new(pattern).find_all(text)
}
