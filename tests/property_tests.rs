//! Property-based tests for fitting and merging.
//!
//! Run with: cargo test --test property_tests

mod common;

use common::{Recorder, more, per_line};
use proptest::prelude::*;
use show_more::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Mixed-width text without tabs or newlines.
fn line_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.全文字]{0,120}"
}

fn random_style() -> impl Strategy<Value = Style> {
    (any::<bool>(), any::<bool>(), prop::option::of(0u8..16)).prop_map(|(bold, expand, color)| {
        let mut style = Style::new();
        if bold {
            style = style.bold();
        }
        if expand {
            style = style.action(Action::Expand);
        }
        if let Some(n) = color {
            style = style.color(Color::from_ansi(n));
        }
        style
    })
}

fn random_boundary() -> impl Strategy<Value = SpanBoundary> {
    prop_oneof![
        Just(SpanBoundary::ExclusiveExclusive),
        Just(SpanBoundary::ExclusiveInclusive),
        Just(SpanBoundary::InclusiveExclusive),
        Just(SpanBoundary::InclusiveInclusive),
    ]
}

/// Styled text with up to eight possibly overlapping spans.
fn styled_text() -> impl Strategy<Value = Text> {
    (
        "[a-z 全]{1,40}",
        prop::collection::vec(
            (0usize..40, 0usize..40, random_style(), random_boundary()),
            0..8,
        ),
    )
        .prop_map(|(plain, ranges)| {
            let mut text = Text::new(plain);
            for (a, b, style, boundary) in ranges {
                text.stylize_with(a.min(b), a.max(b), style, boundary);
            }
            text
        })
}

// ============================================================================
// Fitting
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The result always renders within the limit.
    #[test]
    fn prop_fit_respects_limit(text in line_text(), width in 10usize..40, max_lines in 1usize..4) {
        let measure = CellWrap::new(width).mode(WrapMode::Char);
        let fitted = fit(&text, &measure, &more(max_lines)).unwrap();
        prop_assert!(measure.line_count(fitted.plain()) <= max_lines);
    }

    /// Text that already fits comes back verbatim, without spans.
    #[test]
    fn prop_fit_is_identity_when_short(text in "[a-z]{0,30}") {
        let fitted = fit(&text, &per_line(30), &more(1)).unwrap();
        prop_assert_eq!(fitted.plain(), text.as_str());
        prop_assert!(fitted.spans().is_empty());
    }

    /// A truncated result is a prefix of the input followed by the suffix,
    /// and one more character would not have fit.
    #[test]
    fn prop_fit_prefix_is_maximal(text in "[a-z]{0,80}", width in 9usize..30) {
        let measure = per_line(width);
        let fitter = LineFitter::new(measure, more(2));
        let fitted = fitter.fit_detailed(&text).unwrap();

        if fitted.truncated {
            let plain = fitted.text.plain();
            let prefix = plain.strip_suffix("... more").unwrap();
            prop_assert!(text.starts_with(prefix));
            prop_assert_eq!(prefix.chars().count(), fitted.prefix_len);

            let longer: String = text.chars().take(fitted.prefix_len + 1).collect();
            let longer_with_more = format!("{longer}... more");
            prop_assert!(measure.line_count(&longer_with_more) > 2);
        } else {
            prop_assert_eq!(fitted.text.plain(), text.as_str());
        }
    }

    /// Each linear probe is one character shorter than the previous.
    #[test]
    fn prop_linear_probes_shrink_strictly(text in "[a-z]{20,60}", width in 9usize..20) {
        let recorder = Recorder::new(per_line(width));
        fit(&text, &recorder, &more(1)).unwrap();

        let probes: Vec<usize> = recorder
            .seen()
            .iter()
            .skip(1)
            .map(|s| s.chars().count())
            .collect();
        prop_assert!(probes.windows(2).all(|w| w[0] == w[1] + 1));
    }

    /// The label spans cover exactly the last label characters.
    #[test]
    fn prop_label_covers_last_chars(text in line_text(), width in 10usize..30) {
        let measure = CellWrap::new(width).mode(WrapMode::Char);
        let fitted = fit(&text, &measure, &FitConfig::new(1).ellipsis("..").spacer_width(1)).unwrap();
        let len = fitted.len();
        for span in fitted.spans() {
            prop_assert_eq!((span.start, span.end), (len - 2, len));
        }
    }

    /// From-head agrees with the linear scan under word wrapping, where
    /// appending text never lowers the line count.
    #[test]
    fn prop_from_head_agrees_word_wrap(text in line_text(), width in 10usize..40, max_lines in 1usize..4) {
        let fitter = LineFitter::new(CellWrap::new(width), more(max_lines));
        let expected = fitter.fit_detailed(&text).unwrap();
        let from_head = fitter.fit_from_head(&text).unwrap();
        prop_assert_eq!(from_head.text, expected.text);
        prop_assert!(from_head.measurements <= expected.measurements + 1);
    }

    /// Bisect and from-head agree with the linear scan in char mode. Bisect
    /// stays char-only: under word wrapping a trailing space gives the
    /// suffix an earlier break, so prefix plus suffix can lose a line as the
    /// prefix grows.
    #[test]
    fn prop_strategies_agree(text in line_text(), width in 10usize..40, max_lines in 1usize..4) {
        let measure = CellWrap::new(width).mode(WrapMode::Char);
        let linear = LineFitter::new(measure, more(max_lines));
        let bisect = LineFitter::new(measure, more(max_lines).strategy(ShrinkStrategy::Bisect));

        let expected = linear.fit_detailed(&text).unwrap();
        prop_assert_eq!(&bisect.fit_detailed(&text).unwrap().text, &expected.text);
        prop_assert_eq!(&linear.fit_from_head(&text).unwrap().text, &expected.text);
    }
}

// ============================================================================
// Merging
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Merge keeps span count, order, styles and widths; only offsets move.
    #[test]
    fn prop_merge_shifts_spans(prefix in "[a-z全 ]{0,20}", styled in styled_text()) {
        let merged = merge(&prefix, &styled);
        let offset = prefix.chars().count();

        prop_assert_eq!(merged.plain(), format!("{prefix}{}", styled.plain()));
        prop_assert_eq!(merged.spans().len(), styled.spans().len());
        for (before, after) in styled.spans().iter().zip(merged.spans()) {
            prop_assert_eq!(after.start, before.start + offset);
            prop_assert_eq!(after.len(), before.len());
            prop_assert_eq!(&after.style, &before.style);
            prop_assert_eq!(after.boundary, before.boundary);
        }
    }

    /// Merging twice equals merging the concatenated prefix.
    #[test]
    fn prop_merge_composes(a in "[a-z]{0,10}", b in "[a-z]{0,10}", styled in styled_text()) {
        let twice = merge(&a, &merge(&b, &styled));
        let once = merge(&format!("{a}{b}"), &styled);
        prop_assert_eq!(twice, once);
    }

    /// Inserting into the plain text keeps every span within bounds.
    #[test]
    fn prop_insert_keeps_spans_in_bounds(styled in styled_text(), at in 0usize..50, insert in "[a-z]{0,5}") {
        let mut text = styled;
        text.insert(at, &insert);
        for span in text.spans() {
            prop_assert!(span.start <= span.end);
            prop_assert!(span.end <= text.len());
        }
    }
}
