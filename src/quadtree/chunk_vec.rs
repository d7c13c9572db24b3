/// Growable vector that allocates in fixed-size chunks, so that pushing never
/// moves existing elements.
pub struct ChunkVec<T> {
    chunks: Vec<Vec<T>>,
    chunk_log2: u32,
    len: usize,
}

impl<T> ChunkVec<T> {
    pub fn new(chunk_log2: u32) -> Self {
        Self {
            chunks: vec![Vec::with_capacity(1 << chunk_log2)],
            chunk_log2,
            len: 0,
        }
    }

    #[inline]
    fn chunk_size(&self) -> usize {
        1 << self.chunk_log2
    }

    #[inline]
    pub fn push(&mut self, val: T) {
        if self.chunks.last().map_or(true, |c| c.len() == self.chunk_size()) {
            self.chunks.push(Vec::with_capacity(self.chunk_size()));
        }
        if let Some(last) = self.chunks.last_mut() {
            last.push(val);
        }
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Drops all elements and every chunk but the first one.
    ///
    /// A different `chunk_log2` discards the first chunk as well.
    pub fn reset(&mut self, chunk_log2: u32) {
        if chunk_log2 != self.chunk_log2 {
            *self = Self::new(chunk_log2);
            return;
        }
        self.chunks.truncate(1);
        if let Some(first) = self.chunks.first_mut() {
            first.clear();
        }
        self.len = 0;
    }

    pub fn bytes_total(&self) -> usize {
        self.chunks.len() * (std::mem::size_of::<Vec<T>>() + self.chunk_size() * std::mem::size_of::<T>())
    }
}

impl<T> std::ops::Index<usize> for ChunkVec<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.chunks[index >> self.chunk_log2][index & (self.chunk_size() - 1)]
    }
}

impl<T> std::ops::IndexMut<usize> for ChunkVec<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let mask = self.chunk_size() - 1;
        &mut self.chunks[index >> self.chunk_log2][index & mask]
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkVec;

    #[test]
    fn test_push_across_chunks() {
        let mut v = ChunkVec::new(2);
        for i in 0..10 {
            v.push(i);
        }
        assert_eq!(v.len(), 10);
        assert_eq!(v.chunk_count(), 3);
        assert_eq!((0..10).map(|i| v[i]).collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        v[5] = 50;
        assert_eq!(v[5], 50);
    }

    #[test]
    fn test_reset_keeps_one_chunk() {
        let mut v = ChunkVec::new(2);
        for i in 0..9 {
            v.push(i);
        }
        v.reset(2);
        assert_eq!(v.len(), 0);
        assert_eq!(v.chunk_count(), 1);
        v.push(7);
        assert_eq!(v[0], 7);

        v.reset(3);
        assert_eq!(v.len(), 0);
        for i in 0..8 {
            v.push(i);
        }
        assert_eq!(v.chunk_count(), 1);
    }
}
