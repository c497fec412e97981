//! Image URL resolution. Pure string assembly, no I/O.

use marquee_models::ImageSize;
use url::Url;

/// Served when a movie has no artwork.
pub const PLACEHOLDER_IMAGE: &str = "/default-movie-poster.jpg";

/// Resolve an artwork path into a fully qualified CDN URL.
///
/// Absent or blank paths resolve to [`PLACEHOLDER_IMAGE`].
#[must_use]
pub fn image_url(image_base: &Url, path: Option<&str>, size: ImageSize) -> String {
    let Some(path) = path.map(str::trim).filter(|path| !path.is_empty()) else {
        return PLACEHOLDER_IMAGE.to_string();
    };
    let base = image_base.as_str().trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}/{size}{path}")
    } else {
        format!("{base}/{size}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://image.tmdb.org/t/p").expect("valid base")
    }

    #[test]
    fn missing_path_resolves_to_placeholder() {
        assert_eq!(image_url(&base(), None, ImageSize::W500), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(&base(), Some("  "), ImageSize::W500), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn path_is_joined_with_size_token() {
        assert_eq!(
            image_url(&base(), Some("/abc.jpg"), ImageSize::Original),
            "https://image.tmdb.org/t/p/original/abc.jpg"
        );
        assert_eq!(
            image_url(&base(), Some("abc.jpg"), ImageSize::W342),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let base = Url::parse("https://cdn.example/t/p/").expect("valid base");
        assert_eq!(
            image_url(&base, Some("/x.png"), ImageSize::W1280),
            "https://cdn.example/t/p/w1280/x.png"
        );
    }
}
