#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HeaderValue<'b> {
    pub(crate) value: &'b str,
}

impl<'b> HeaderValue<'b> {
    #[inline]
    pub(crate) fn new(value: &'b str) -> Self {
        Self { value }
    }

    #[inline]
    pub fn as_str<'s>(&'s self) -> &'b str
    where
        'b: 's,
    {
        self.value
    }

    #[inline]
    pub fn as_bytes<'s>(&'s self) -> &'b [u8]
    where
        'b: 's,
    {
        self.value.as_bytes()
    }
}

impl<'a, 'b> PartialEq<&'a str> for HeaderValue<'b> {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        self.value == *other
    }
}
