//! Image source port for loading images from various sources.

/// A decoded image together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Base name of the source file, used as the `File` column value.
    pub name: String,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

/// Port for loading images from a source.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image fails to load.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<LoadedImage>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
