#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Minimal one-page PDF drawing `page_text`, with a `/Title` in its info
/// dictionary. Builds body then xref with correct byte offsets.
pub fn titled_pdf(title: &str, page_text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 712 Td ({}) Tj ET", page_text);
    let bodies = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        format!("<< /Title ({}) >>", title),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in bodies.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", bodies.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{}\n%%EOF\n",
            bodies.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

pub const KEYWORDS_JSON: &str = r#"{
  "Programming": ["rust", "python", "compiler"],
  "AI": ["ai", "neural network", "machine learning"],
  "Math": ["algebra", "calculus"],
  "Database": ["sql", "database"],
  "Security": ["security", "encryption"]
}"#;

/// Writes the keyword map into `dir` and returns its path.
pub fn write_keywords(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("keywords.json");
    fs::write(&path, KEYWORDS_JSON).unwrap();
    path
}

/// The three-document inbox: an AI paper whose evidence is on its first
/// page, an unparseable security audit, and a file with no evidence at all.
pub fn populate_inbox(inbox: &Path) {
    fs::create_dir_all(inbox).unwrap();
    fs::write(
        inbox.join("paper.pdf"),
        titled_pdf("Primer", "a neural network ai primer"),
    )
    .unwrap();
    fs::write(inbox.join("security_audit.pdf"), b"not a valid pdf").unwrap();
    fs::write(
        inbox.join("grocery_list.pdf"),
        titled_pdf("Weekly shopping", "eggs milk bread"),
    )
    .unwrap();
}
