use crate::error::CoreError;

/// Buffer de pixels RGB. 3 bytes par pixel, row-major, pas d'alpha.
///
/// L'ordre des canaux est garanti par l'appelant : une source BGR doit
/// convertir avant de construire le buffer. Le buffer est une entrée
/// explicite de chaque appel d'échantillonnage ou d'extraction, aucun
/// composant ne le retient entre deux appels.
///
/// # Example
/// ```
/// use tn_core::buffer::PixelBuffer;
/// let buf = PixelBuffer::new(10, 10);
/// assert_eq!(buf.data.len(), 300);
/// ```
#[derive(Clone)]
pub struct PixelBuffer {
    /// Pixels RGB, row-major, 3 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Crée un buffer noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use tn_core::buffer::PixelBuffer;
    /// let buf = PixelBuffer::new(4, 2);
    /// assert_eq!((buf.width, buf.height), (4, 2));
    /// assert_eq!(buf.pixel(0, 0), (0, 0, 0));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 3],
            width,
            height,
        }
    }

    /// Construit un buffer depuis des données brutes déjà décodées.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferSize`] if `data.len()` is not
    /// `width * height * 3`.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Accès au pixel (x, y) → (r, g, b).
    ///
    /// # Example
    /// ```
    /// use tn_core::buffer::PixelBuffer;
    /// let mut buf = PixelBuffer::new(2, 2);
    /// buf.set_pixel(1, 0, (255, 165, 0));
    /// assert_eq!(buf.pixel(1, 0), (255, 165, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        if idx + 2 >= self.data.len() {
            return (0, 0, 0);
        }
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Écrit le pixel (x, y). Hors bornes : no-op.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        self.data[idx] = rgb.0;
        self.data[idx + 1] = rgb.1;
        self.data[idx + 2] = rgb.2;
    }

    /// Nombre total de pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True si le buffer ne contient aucun pixel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_validates_length() {
        let ok = PixelBuffer::from_raw(vec![0u8; 12], 2, 2);
        assert!(ok.is_ok());

        let err = PixelBuffer::from_raw(vec![0u8; 11], 2, 2);
        match err {
            Err(CoreError::BufferSize { expected, actual }) => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 11);
            }
            _ => panic!("expected BufferSize error"),
        }
    }

    #[test]
    fn set_then_get_roundtrip() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.set_pixel(2, 1, (10, 20, 30));
        assert_eq!(buf.pixel(2, 1), (10, 20, 30));
        assert_eq!(buf.pixel(0, 0), (0, 0, 0));
    }

    #[test]
    fn empty_buffer() {
        let buf = PixelBuffer::new(0, 5);
        assert!(buf.is_empty());
        assert_eq!(buf.pixel_count(), 0);
    }
}
