//! Text formats implied by note file extensions.

use std::fmt;
use std::path::Path;

/// Extensions recognized as notes when scanning a storage directory.
pub const NOTE_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "text", "rtf"];

/// The on-disk format of a note, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// Plain UTF-8 text.
    Plain,
    /// Markdown, stored and read as plain UTF-8 text.
    Markdown,
    /// Rich Text Format. The only rich format.
    Rtf,
}

impl TextFormat {
    /// Maps an extension (without the dot, any case) to a format.
    ///
    /// Unknown extensions are treated as plain text.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "rtf" => TextFormat::Rtf,
            "md" | "markdown" => TextFormat::Markdown,
            _ => TextFormat::Plain,
        }
    }

    /// Returns the format for a path, or `Plain` when it has no extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(TextFormat::Plain)
    }

    pub fn is_rich_text(self) -> bool {
        self == TextFormat::Rtf
    }

    /// Encodes plain text into the bytes stored on disk for this format.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextFormat::Plain | TextFormat::Markdown => text.as_bytes().to_vec(),
            TextFormat::Rtf => rtf::encode(text).into_bytes(),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextFormat::Plain => "plain",
            TextFormat::Markdown => "markdown",
            TextFormat::Rtf => "rtf",
        };
        f.write_str(name)
    }
}

/// Minimal RTF support: a writer for plain text and a reader that collapses
/// a document back to its text.
pub mod rtf {
    use std::fmt;

    const HEADER: &str = "{\\rtf1\\ansi\\ansicpg1252\\deff0{\\fonttbl{\\f0\\fswiss Helvetica;}}\\f0\\fs24 ";

    /// Destinations whose contents are never document text.
    const SKIPPED_DESTINATIONS: &[&str] = &[
        "fonttbl",
        "colortbl",
        "stylesheet",
        "info",
        "pict",
        "header",
        "footer",
        "headerl",
        "headerr",
        "footerl",
        "footerr",
        "expandedcolortbl",
        "listtable",
        "listoverridetable",
        "generator",
    ];

    /// Reasons an RTF document could not be read.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RtfError {
        MissingHeader,
        UnbalancedGroups,
        InvalidHexEscape,
    }

    impl fmt::Display for RtfError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                RtfError::MissingHeader => write!(f, "document does not start with {{\\rtf"),
                RtfError::UnbalancedGroups => write!(f, "unbalanced braces"),
                RtfError::InvalidHexEscape => write!(f, "invalid \\' hex escape"),
            }
        }
    }

    impl std::error::Error for RtfError {}

    /// Wraps plain text in a minimal RTF document.
    pub fn encode(text: &str) -> String {
        let mut out = String::with_capacity(HEADER.len() + text.len() + 2);
        out.push_str(HEADER);
        for c in text.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '{' => out.push_str("\\{"),
                '}' => out.push_str("\\}"),
                '\n' => out.push_str("\\par\n"),
                '\t' => out.push_str("\\tab "),
                '\r' => {}
                c if c.is_ascii() => out.push(c),
                c => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        out.push_str(&format!("\\u{}?", *unit as i16));
                    }
                }
            }
        }
        out.push('}');
        out
    }

    struct Group {
        skip: bool,
        uc: usize,
    }

    /// Extracts the text of an RTF document.
    pub fn decode(input: &str) -> Result<String, RtfError> {
        if !input.trim_start().starts_with("{\\rtf") {
            return Err(RtfError::MissingHeader);
        }

        let chars: Vec<char> = input.chars().collect();
        let mut out = String::new();
        let mut stack: Vec<Group> = Vec::new();
        let mut pending_surrogate: Option<u16> = None;
        // Characters still to drop after a \uN escape.
        let mut fallback_skip = 0usize;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '{' => {
                    let (skip, uc) = stack.last().map_or((false, 1), |g| (g.skip, g.uc));
                    stack.push(Group { skip, uc });
                    fallback_skip = 0;
                    i += 1;
                }
                '}' => {
                    if stack.pop().is_none() {
                        return Err(RtfError::UnbalancedGroups);
                    }
                    fallback_skip = 0;
                    i += 1;
                    if stack.is_empty() {
                        break;
                    }
                }
                '\\' => {
                    i += 1;
                    let Some(&next) = chars.get(i) else {
                        break;
                    };
                    let skip = stack.last().is_some_and(|g| g.skip);

                    if next.is_ascii_alphabetic() {
                        let start = i;
                        while i < chars.len() && chars[i].is_ascii_alphabetic() {
                            i += 1;
                        }
                        let word: String = chars[start..i].iter().collect();

                        let num_start = i;
                        if i < chars.len() && chars[i] == '-' {
                            i += 1;
                        }
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                        let param: Option<i32> = chars[num_start..i]
                            .iter()
                            .collect::<String>()
                            .parse()
                            .ok();
                        if i < chars.len() && chars[i] == ' ' {
                            i += 1;
                        }

                        if SKIPPED_DESTINATIONS.contains(&word.as_str()) {
                            if let Some(group) = stack.last_mut() {
                                group.skip = true;
                            }
                            continue;
                        }
                        if skip {
                            continue;
                        }
                        if fallback_skip > 0 {
                            fallback_skip -= 1;
                            continue;
                        }

                        match word.as_str() {
                            "par" | "line" | "sect" | "page" => out.push('\n'),
                            "tab" => out.push('\t'),
                            "emdash" => out.push('\u{2014}'),
                            "endash" => out.push('\u{2013}'),
                            "bullet" => out.push('\u{2022}'),
                            "lquote" => out.push('\u{2018}'),
                            "rquote" => out.push('\u{2019}'),
                            "ldblquote" => out.push('\u{201C}'),
                            "rdblquote" => out.push('\u{201D}'),
                            "uc" => {
                                if let Some(group) = stack.last_mut() {
                                    group.uc = param.unwrap_or(1).max(0) as usize;
                                }
                            }
                            "u" => {
                                let unit = param.unwrap_or(0) as i16 as u16;
                                push_utf16(&mut out, &mut pending_surrogate, unit);
                                fallback_skip = stack.last().map_or(1, |g| g.uc);
                            }
                            _ => {}
                        }
                    } else if next == '\'' {
                        let hex: String = chars.get(i + 1..i + 3).unwrap_or_default().iter().collect();
                        let byte =
                            u8::from_str_radix(&hex, 16).map_err(|_| RtfError::InvalidHexEscape)?;
                        i += 3;
                        if skip {
                            continue;
                        }
                        if fallback_skip > 0 {
                            fallback_skip -= 1;
                            continue;
                        }
                        out.push(cp1252_to_char(byte));
                    } else {
                        i += 1;
                        match next {
                            '*' => {
                                if let Some(group) = stack.last_mut() {
                                    group.skip = true;
                                }
                            }
                            '\\' | '{' | '}' if !skip => {
                                if fallback_skip > 0 {
                                    fallback_skip -= 1;
                                } else {
                                    out.push(next);
                                }
                            }
                            '~' if !skip => out.push('\u{00A0}'),
                            '_' if !skip => out.push('\u{2011}'),
                            '\n' | '\r' if !skip => out.push('\n'),
                            _ => {}
                        }
                    }
                }
                '\r' | '\n' => i += 1,
                _ => {
                    i += 1;
                    if stack.last().is_some_and(|g| g.skip) {
                        continue;
                    }
                    if fallback_skip > 0 {
                        fallback_skip -= 1;
                        continue;
                    }
                    out.push(c);
                }
            }
        }

        if !stack.is_empty() {
            return Err(RtfError::UnbalancedGroups);
        }
        Ok(out)
    }

    fn push_utf16(out: &mut String, pending: &mut Option<u16>, unit: u16) {
        if let Some(high) = pending.take() {
            if let Some(Ok(c)) = char::decode_utf16([high, unit]).next() {
                out.push(c);
                return;
            }
        }
        if (0xD800..0xDC00).contains(&unit) {
            *pending = Some(unit);
        } else if let Some(c) = char::from_u32(u32::from(unit)) {
            out.push(c);
        }
    }

    /// Windows-1252 byte to char; the 0x80-0x9F block differs from Latin-1.
    fn cp1252_to_char(byte: u8) -> char {
        const HIGH: [char; 32] = [
            '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}',
            '\u{2021}', '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}',
            '\u{017D}', '\u{FFFD}', '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}',
            '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}',
            '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
        ];
        match byte {
            0x80..=0x9F => HIGH[usize::from(byte - 0x80)],
            _ => char::from(byte),
        }
    }
}
