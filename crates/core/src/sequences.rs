//! Odometer over fixed-length sequences drawn (with repetition) from an alphabet.
//! Yields in lexicographic order of alphabet position.

pub struct Sequences<'a, T> {
    alphabet: &'a [T],
    digits: Vec<usize>,
    done: bool,
}

/// All `alphabet.len().pow(len)` sequences of length `len`.
/// Length 0 yields one empty sequence; an empty alphabet yields nothing for `len > 0`.
pub fn sequences<T: Copy>(alphabet: &[T], len: usize) -> Sequences<'_, T> {
    Sequences {
        alphabet,
        digits: vec![0; len],
        done: len > 0 && alphabet.is_empty(),
    }
}

/// Every sequence of length `0..=max_len`, shortest first.
pub fn shortlex<T: Copy>(alphabet: &[T], max_len: usize) -> impl Iterator<Item = Vec<T>> + '_ {
    (0..=max_len).flat_map(move |len| sequences(alphabet, len))
}

impl<T: Copy> Iterator for Sequences<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let item = self.digits.iter().map(|&d| self.alphabet[d]).collect();

        // advance rightmost digit, carrying left
        self.done = true;
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.alphabet.len() {
                self.done = false;
                break;
            }
            *digit = 0;
        }
        Some(item)
    }
}
