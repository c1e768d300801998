use indicatif::ProgressStyle;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Style of the spinner shown while a sweep or probe span is open.
///
/// `span_name` and `span_fields` are filled in by `tracing-indicatif`.
pub fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{span_child_prefix}{spinner:.blue} {span_name} {span_fields} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}
