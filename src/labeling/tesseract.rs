//! Text recognition through the `tesseract` command-line tool.

use std::io::Cursor;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::backend::{RecognizerError, TextRecognizer};
use super::word::{BoxCoords, RawWord};

const WORD_LEVEL: &str = "5";

/// Runs `tesseract stdin stdout -l <langs> tsv` with the crop piped as PNG.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }
}

#[async_trait]
impl TextRecognizer for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(
        &self,
        image: &DynamicImage,
        languages: &[String],
    ) -> Result<Vec<RawWord>, RecognizerError> {
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;
        let png = png.into_inner();

        let lang = languages.join("+");
        let mut cmd = Command::new(&self.binary);
        cmd.args(["stdin", "stdout"]);
        if !lang.is_empty() {
            cmd.args(["-l", lang.as_str()]);
        }
        cmd.arg("tsv")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RecognizerError::Unavailable(format!(
                    "{} not found",
                    self.binary.display()
                ))
            } else {
                RecognizerError::Spawn(err)
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).await.map_err(RecognizerError::Spawn)?;
            stdin.shutdown().await.map_err(RecognizerError::Spawn)?;
        }

        let out = child
            .wait_with_output()
            .await
            .map_err(RecognizerError::Spawn)?;
        if !out.status.success() {
            let status = out
                .status
                .code()
                .map_or("unknown".to_string(), |code| code.to_string());
            return Err(RecognizerError::Failed {
                status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let words = parse_tsv(&String::from_utf8_lossy(&out.stdout))?;
        debug!(count = words.len(), lang = %lang, "tesseract returned words");
        Ok(words)
    }
}

/// Parses tesseract TSV output, keeping word-level rows with non-blank text.
pub fn parse_tsv(tsv: &str) -> Result<Vec<RawWord>, RecognizerError> {
    let mut lines = tsv.lines();
    let header = lines
        .next()
        .ok_or_else(|| RecognizerError::Parse("empty tsv output".to_string()))?;
    let columns: Vec<&str> = header.split('\t').collect();
    let column = |name: &str| {
        columns
            .iter()
            .position(|c| c.trim() == name)
            .ok_or_else(|| RecognizerError::Parse(format!("missing tsv column '{name}'")))
    };
    let level = column("level")?;
    let left = column("left")?;
    let top = column("top")?;
    let width = column("width")?;
    let height = column("height")?;
    let text = column("text")?;

    let mut words = Vec::new();
    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.get(level).map(|l| l.trim()) != Some(WORD_LEVEL) {
            continue;
        }
        let word_text = fields.get(text).copied().unwrap_or("");
        if word_text.trim().is_empty() {
            continue;
        }
        let number = |idx: usize| fields.get(idx).and_then(|v| v.trim().parse::<f64>().ok());
        match (number(left), number(top), number(width), number(height)) {
            (Some(l), Some(t), Some(w), Some(h)) => {
                words.push(RawWord::new(word_text, BoxCoords::left_top(l, t, w, h)));
            }
            _ => debug!(line, "skipping tsv row with malformed box"),
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::word::normalize_words;

    const SAMPLE: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext
1\t1\t0\t0\t0\t0\t0\t0\t422\t173\t-1\t
4\t1\t1\t1\t1\t0\t12\t40\t150\t20\t-1\t
5\t1\t1\t1\t1\t1\t12\t40\t60\t20\t96.5\tSalvar
5\t1\t1\t1\t1\t2\t80\t41\t82\t19\t91.0\talterações
5\t1\t1\t1\t1\t3\t170\t41\t5\t19\t10.0\t
5\t1\t1\t1\t1\t4\tx\t41\t5\t19\t10.0\tlixo
";

    #[test]
    fn parses_word_rows_only() {
        let words = parse_tsv(SAMPLE).expect("parse tsv");
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Salvar", "alterações"]);

        let normalized = normalize_words(words);
        assert_eq!(normalized[0].bbox.max_x, 72.0);
        assert_eq!(normalized[1].bbox.max_y, 60.0);
    }

    #[test]
    fn header_only_yields_no_words() {
        let words = parse_tsv("level\tleft\ttop\twidth\theight\ttext\n").expect("parse tsv");
        assert!(words.is_empty());
    }

    #[test]
    fn missing_columns_is_a_parse_error() {
        let err = parse_tsv("level\ttext\n5\tSalvar\n").unwrap_err();
        assert!(matches!(err, RecognizerError::Parse(_)));
        assert!(parse_tsv("").is_err());
    }

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let backend = TesseractCli::new("/nonexistent/homolog-tesseract");
        let image = DynamicImage::new_rgba8(8, 8);
        let err = backend
            .recognize(&image, &["por".to_string(), "eng".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, RecognizerError::Unavailable(_)));
    }
}
