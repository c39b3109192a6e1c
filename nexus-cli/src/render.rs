//! Plain-text rendering for terminal output.

use std::fmt::Write;

use nexus_rag::{
    ActivitySample, Answer, Architecture, CoverageEntry, DocumentChunk, SystemMetric, Trend,
    UseCase,
};

const BAR_WIDTH: u32 = 30;

pub fn chunks(chunks: &[DocumentChunk]) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [score={:.2}] {} ({})",
            i + 1,
            chunk.score,
            chunk.source,
            chunk.id
        );
        let _ = writeln!(out, "   {}", chunk.content);
    }
    out
}

pub fn answer(answer: &Answer) -> String {
    let mut out = format!("{}\n", answer.text);
    if !answer.used_chunks.is_empty() {
        out.push_str("\nSources:\n");
        for chunk in &answer.used_chunks {
            let _ = writeln!(out, "  - {} [{:.0}%]", chunk.source, chunk.score * 100.0);
        }
    }
    out
}

pub fn use_cases(use_cases: &[&UseCase]) -> String {
    if use_cases.is_empty() {
        return "(no use cases)\n".to_string();
    }
    let mut out = String::new();
    for u in use_cases {
        let _ = writeln!(
            out,
            "{:<7} {:<30} {:<9} {:<12} {:<15} {}",
            u.id, u.title, u.domain, u.status, u.owner, u.last_updated
        );
        let _ = writeln!(out, "        {}", u.description);
    }
    out
}

pub fn metrics(metrics: &[SystemMetric]) -> String {
    let mut out = String::new();
    for m in metrics {
        let arrow = match m.trend {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Neutral => "→",
        };
        let value = m.value.to_string();
        let _ = writeln!(out, "{:<22} {:>10}  {arrow} {}", m.name, value, m.detail);
    }
    out
}

pub fn activity(samples: &[ActivitySample]) -> String {
    let mut out = String::from("Query volume vs latency\n");
    for s in samples {
        let _ = writeln!(
            out,
            "  {}  {:>5} queries  {:>5} ms",
            s.time.format("%H:%M"),
            s.queries,
            s.latency_ms
        );
    }
    out
}

/// Horizontal bars scaled to the largest area.
pub fn coverage(entries: &[CoverageEntry]) -> String {
    let mut out = String::from("Knowledge base coverage\n");
    let max = entries.iter().map(|e| e.docs).max().unwrap_or(0).max(1);
    for e in entries {
        let bar = "#".repeat((e.docs * BAR_WIDTH / max) as usize);
        let _ = writeln!(out, "  {:<10} {:>5}  {bar}", e.area, e.docs);
    }
    out
}

pub fn architecture(architecture: &Architecture) -> String {
    let mut out = format!("{}\n{}\n\n", architecture.title, architecture.summary);
    for (i, stage) in architecture.stages.iter().enumerate() {
        if i > 0 {
            out.push_str("   |\n   v\n");
        }
        let _ = writeln!(out, "{}. {}", i + 1, stage.title);
        let _ = writeln!(out, "   {}", stage.description);
    }
    if !architecture.implementation_details.is_empty() {
        out.push_str("\nImplementation details:\n");
        for detail in &architecture.implementation_details {
            let _ = writeln!(out, "  - {detail}");
        }
    }
    out
}
