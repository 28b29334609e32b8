use std::fmt::Display;

/// File name split at the last dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileName {
    pub basename: String,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

const IMAGE_EXT: &[&'static str] = &["png", "jpg", "jpeg", "gif", "tiff", "tga", "webp"];
const VIDEO_EXT: &[&'static str] = &["mp4", "mov", "mkv"];

impl FileName {
    pub fn new(basename: String, extension: Option<String>) -> FileName {
        FileName { basename, extension }
    }

    /// Last path segment of a URL or path, query and fragment removed.
    pub fn from_url(url: &str) -> FileName {
        let url = url.split(['?', '#']).next().unwrap_or(url);
        let name = url.rsplit('/').next().unwrap_or(url);
        FileName::from(name)
    }

    pub fn extension_str(&self) -> &str {
        match &self.extension {
            Some(ext) => ext.as_str(),
            None => "",
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        let ext = self.extension_str().to_lowercase();
        if IMAGE_EXT.iter().any(|image_ext| ext == *image_ext) {
            MediaKind::Image
        } else if VIDEO_EXT.iter().any(|video_ext| ext == *video_ext) {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}

impl From<&str> for FileName {
    fn from(name: &str) -> Self {
        match name.rsplit_once(".") {
            Some((pre, suf)) => FileName::new(pre.to_string(), Some(suf.to_string())),
            None => FileName::new(name.to_string(), None)
        }
    }
}

impl From<String> for FileName {
    fn from(name: String) -> Self {
        FileName::from(name.as_str())
    }
}

impl Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.extension {
            Some(ext) => write!(f, "{}.{}", self.basename, ext),
            None => write!(f, "{}", self.basename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let name = FileName::from("archive.tar.gz");
        assert_eq!(name.basename, "archive.tar");
        assert_eq!(name.extension_str(), "gz");
        assert_eq!(name.to_string(), "archive.tar.gz");

        let name = FileName::from("README");
        assert_eq!(name.extension, None);
        assert_eq!(name.to_string(), "README");
    }

    #[test]
    fn test_media_kind() {
        assert_eq!(FileName::from("a.PNG").media_kind(), MediaKind::Image);
        assert_eq!(FileName::from("clip.mp4").media_kind(), MediaKind::Video);
        assert_eq!(FileName::from("notes.pdf").media_kind(), MediaKind::Other);
        assert_eq!(FileName::from("noext").media_kind(), MediaKind::Other);
    }

    #[test]
    fn test_from_url() {
        let name = FileName::from_url("https://telegra.ph/file/abc.jpg?size=2#top");
        assert_eq!(name.to_string(), "abc.jpg");
        assert_eq!(name.media_kind(), MediaKind::Image);
        assert_eq!(FileName::from_url("/file/x.mov").media_kind(), MediaKind::Video);
    }
}
