//! Typed suggestions for common header values.

use std::fmt;

macro_rules! suggested_values {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// The header value this suggestion stands for.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

suggested_values! {
    /// Popular MIME types for `Accept` and `Content-Type`.
    MimeType {
        Html => "text/html",
        Xml => "application/xml",
        Css => "text/css",
        Text => "text/plain",
        JavaScript => "text/javascript",
        Ttf => "font/ttf",
        Woff => "font/woff",
        Woff2 => "font/woff2",
        Jpeg => "image/jpeg",
        Png => "image/png",
        Svg => "image/svg+xml",
        Gif => "image/gif",
        Webp => "image/webp",
        Wav => "audio/wav",
        Ogg => "audio/ogg",
        Mp4 => "video/mp4",
        H265 => "video/H265",
        H266 => "video/H266",
        Av1 => "video/AV1",
        Json => "application/json",
        Pdf => "application/pdf",
        Excel => "application/vnd.ms-excel",
        PowerPoint => "application/vnd.ms-powerpoint",
        Word => "application/msword",
        Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        FormData => "multipart/form-data",
        ByteRanges => "multipart/byteranges",
        OctetStream => "application/octet-stream",
    }
}

suggested_values! {
    CacheControlSuggest {
        NoCache => "no-cache",
        NoStore => "no-store",
        Private => "private",
        MaxAge400 => "max-age=400",
    }
}

suggested_values! {
    ContentDispositionSuggest {
        Inline => "inline",
        Attachment => "attachment",
    }
}

suggested_values! {
    ContentEncodingSuggest {
        Gzip => "gzip",
        Br => "br",
        Deflate => "deflate",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_render_header_values() {
        assert_eq!(MimeType::Json.as_str(), "application/json");
        assert_eq!(CacheControlSuggest::MaxAge400.to_string(), "max-age=400");
        assert_eq!(ContentDispositionSuggest::Attachment.as_str(), "attachment");
        assert_eq!(ContentEncodingSuggest::Br.as_str(), "br");
    }
}
