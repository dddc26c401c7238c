use crate::list::MoveDir1D;

#[allow(unused_macros)]
macro_rules! strs {
    ( $( $ss: expr ),* ) => {
        vec![ $( String::from($ss), )* ]
    };
}

/// Calculate a wrapped index offset within a list of `modulus` elements.
pub(crate) fn idx_offset(
    index: usize,
    offset: usize,
    dir: &MoveDir1D,
    modulus: usize,
) -> Option<usize> {
    if modulus == 0 {
        return None;
    }

    let offset = offset % modulus;

    let new = match dir {
        MoveDir1D::Next => (index + offset) % modulus,
        MoveDir1D::Previous => (modulus + index - offset) % modulus,
    };

    Some(new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idx_offset_wraps() {
        let next = MoveDir1D::Next;
        let prev = MoveDir1D::Previous;

        assert_eq!(idx_offset(0, 1, &next, 5), Some(1));
        assert_eq!(idx_offset(4, 1, &next, 5), Some(0));
        assert_eq!(idx_offset(0, 1, &prev, 5), Some(4));
        assert_eq!(idx_offset(3, 1, &prev, 5), Some(2));

        // Offsets larger than the list wrap around.
        assert_eq!(idx_offset(2, 7, &next, 5), Some(4));
        assert_eq!(idx_offset(2, 7, &prev, 5), Some(0));
    }

    #[test]
    fn test_idx_offset_empty() {
        assert_eq!(idx_offset(0, 1, &MoveDir1D::Next, 0), None);
        assert_eq!(idx_offset(0, 1, &MoveDir1D::Previous, 0), None);
    }
}
