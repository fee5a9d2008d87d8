use crate::header::{Header, HeaderEntry, HeaderName, HeaderValue};
use std::slice::Iter;

#[derive(Debug)]
pub struct HeaderIterator<'b> {
    pub(crate) iter: Iter<'b, HeaderEntry>,
}

impl<'b> Iterator for HeaderIterator<'b> {
    type Item = Header<'b>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| Header {
            name: HeaderName::new(&entry.name),
            value: HeaderValue::new(&entry.value),
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for HeaderIterator<'_> {}
