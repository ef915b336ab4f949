#[cfg(test)]
mod escape_tests {
    use crate::*;

    #[test]
    fn test_escapes_every_significant_character() {
        let escaped = escape_html(r#"a & b < c > d " e ' f"#);
        assert_eq!(escaped, "a &amp; b &lt; c &gt; d &quot; e &#39; f");
    }

    #[test]
    fn test_output_contains_no_literal_significant_characters() {
        let hostile = r#"<img src="x" onerror='alert(&`"'>"#;
        let escaped = escape_html(hostile);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        // Every remaining ampersand must open an entity we produced.
        for (i, _) in escaped.match_indices('&') {
            let rest = &escaped[i..];
            assert!(
                rest.starts_with("&amp;")
                    || rest.starts_with("&lt;")
                    || rest.starts_with("&gt;")
                    || rest.starts_with("&quot;")
                    || rest.starts_with("&#39;"),
                "bare ampersand in {escaped}"
            );
        }
    }

    #[test]
    fn test_already_escaped_input_double_escapes_ampersand() {
        // Not idempotent by construction; callers escape exactly once.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_html("octocat"), "octocat");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_path_segment_encoding() {
        assert_eq!(encode_path_segment("octocat"), "octocat");
        assert_eq!(encode_path_segment("mona-lisa_1.0~"), "mona-lisa_1.0~");
        assert_eq!(encode_path_segment("john doe"), "john%20doe");
        assert_eq!(encode_path_segment("a/b?c"), "a%2Fb%3Fc");
        // Non-ASCII encodes per UTF-8 byte.
        assert_eq!(encode_path_segment("é"), "%C3%A9");
    }
}

#[cfg(test)]
mod controller_tests {
    use crate::*;

    #[test]
    fn test_empty_input_is_a_validation_failure() {
        let err = validate_username("").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::Validation);
        assert_eq!(err.to_string(), "Please enter a GitHub username.");
    }

    #[test]
    fn test_whitespace_only_input_is_a_validation_failure() {
        let err = validate_username("   \t ").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::Validation);
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(validate_username("  octocat \n").unwrap(), "octocat");
    }

    #[test]
    fn test_lookup_url_encodes_the_login() {
        assert_eq!(
            lookup_url(DEFAULT_BASE_URL, "octocat"),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(
            lookup_url("https://api.github.com/", "john doe"),
            "https://api.github.com/users/john%20doe"
        );
        // A path-traversal-shaped login stays a single segment.
        assert_eq!(
            lookup_url("http://localhost:3000", "../admin"),
            "http://localhost:3000/users/..%2Fadmin"
        );
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let err = classify_status(404, "Not Found", "").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::NotFound);
        assert_eq!(err.to_string(), "User not found.");
    }

    #[test]
    fn test_other_failure_statuses_map_to_network_errors() {
        let err = classify_status(500, "Internal Server Error", "upstream exploded").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::Network);
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
        assert!(message.contains("upstream exploded"));
    }

    #[test]
    fn test_rate_limit_status_carries_empty_body_when_unavailable() {
        let err = classify_status(403, "Forbidden", "").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::Network);
        assert!(err.to_string().starts_with("Network error: 403 Forbidden"));
    }

    #[test]
    fn test_success_status_passes() {
        assert!(classify_status(200, "OK", "").is_ok());
    }

    #[test]
    fn test_malformed_body_is_a_network_error() {
        let err = parse_profile("{\"login\": ").unwrap_err();
        assert_eq!(err.kind(), LookupErrorKind::Network);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let record = parse_profile(
            r#"{"login": "octocat", "avatar_url": "https://avatars.example/1", "html_url": "https://github.com/octocat"}"#,
        )
        .unwrap();
        assert_eq!(record.followers, 0);
        assert_eq!(record.following, 0);
        assert_eq!(record.public_repos, 0);
        assert!(record.name.is_none());
        assert_eq!(record.display_name(), "octocat");
    }

    #[test]
    fn test_unknown_wire_fields_are_ignored() {
        let record = parse_profile(
            r#"{"login": "octocat", "id": 583231, "type": "User", "followers": 3, "avatar_url": "a", "html_url": "h"}"#,
        )
        .unwrap();
        assert_eq!(record.followers, 3);
    }

    #[test]
    fn test_sequencer_invalidates_earlier_generations() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        assert!(sequencer.is_current(first));

        let second = sequencer.begin();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));

        // The newest request wins even when three overlap.
        let third = sequencer.begin();
        assert!(!sequencer.is_current(first));
        assert!(!sequencer.is_current(second));
        assert!(sequencer.is_current(third));
    }
}

#[cfg(test)]
mod render_tests {
    use crate::*;

    fn full_record() -> ProfileRecord {
        parse_profile(
            r#"{
                "login": "octocat",
                "name": "The Octocat",
                "bio": "Mascot & mischief",
                "location": "San Francisco",
                "company": "@github",
                "blog": "example.com",
                "followers": 4242,
                "following": 9,
                "public_repos": 8,
                "avatar_url": "https://avatars.example/583231",
                "html_url": "https://github.com/octocat"
            }"#,
        )
        .unwrap()
    }

    fn minimal_record() -> ProfileRecord {
        parse_profile(
            r#"{"login": "ghost", "avatar_url": "https://avatars.example/ghost", "html_url": "https://github.com/ghost"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_full_record_renders_each_optional_fragment_once_in_order() {
        let html = render_profile(&full_record());

        assert_eq!(html.matches("📍").count(), 1);
        assert_eq!(html.matches("🏢").count(), 1);
        assert_eq!(html.matches("🔗 Website").count(), 1);

        let location = html.find("📍").unwrap();
        let company = html.find("🏢").unwrap();
        let website = html.find("🔗 Website").unwrap();
        assert!(location < company);
        assert!(company < website);
    }

    #[test]
    fn test_stats_render_in_fixed_order_with_counts() {
        let html = render_profile(&full_record());
        let followers = html.find("Followers").unwrap();
        let following = html.find("Following").unwrap();
        let repos = html.find("Repos").unwrap();
        assert!(followers < following);
        assert!(following < repos);
        assert!(html.contains("<strong>4242</strong><span>Followers</span>"));
        assert!(html.contains("<strong>9</strong><span>Following</span>"));
        assert!(html.contains("<strong>8</strong><span>Repos</span>"));
    }

    #[test]
    fn test_profile_link_is_always_present() {
        let html = render_profile(&minimal_record());
        assert!(html.contains(r#"href="https://github.com/ghost""#));
        assert!(html.contains("View on GitHub"));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_missing_optionals_fall_back_and_omit_fragments() {
        let html = render_profile(&minimal_record());
        assert!(html.contains("No bio available"));
        assert!(!html.contains("📍"));
        assert!(!html.contains("🏢"));
        assert!(!html.contains("Website"));
    }

    #[test]
    fn test_empty_string_fields_count_as_absent() {
        // The upstream API sends "" rather than null for some fields.
        let record = parse_profile(
            r#"{"login": "ghost", "bio": "", "blog": "", "company": " ", "avatar_url": "a", "html_url": "h"}"#,
        )
        .unwrap();
        let html = render_profile(&record);
        assert!(html.contains("No bio available"));
        assert!(!html.contains("🏢"));
        assert!(!html.contains("Website"));
    }

    #[test]
    fn test_blog_without_scheme_is_prefixed() {
        let html = render_profile(&full_record());
        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_blog_with_scheme_is_unchanged() {
        let mut record = full_record();
        record.blog = Some("http://example.com".to_string());
        let html = render_profile(&record);
        assert!(html.contains(r#"href="http://example.com""#));
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let html = render_profile(&minimal_record());
        assert!(html.contains(r#"<h2 class="name">ghost</h2>"#));
        assert!(html.contains(r#"<div class="handle">@ghost</div>"#));
    }

    #[test]
    fn test_script_in_name_never_survives_as_markup() {
        let mut record = full_record();
        record.name = Some("<script>alert('pwned')</script>".to_string());
        let html = render_profile(&record);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_attribute_values_cannot_break_out() {
        let mut record = full_record();
        record.avatar_url = r#"x" onerror="alert(1)"#.to_string();
        let html = render_profile(&record);
        assert!(!html.contains(r#""x" onerror"#));
        assert!(html.contains("x&quot; onerror=&quot;alert(1)"));
    }

    #[test]
    fn test_bio_is_escaped_but_fallback_is_literal() {
        let mut record = full_record();
        record.bio = Some("loves <em>tags</em> & ampersands".to_string());
        let html = render_profile(&record);
        assert!(html.contains("loves &lt;em&gt;tags&lt;/em&gt; &amp; ampersands"));
    }

    #[test]
    fn test_message_path_escapes_and_marks_errors() {
        let html = render_message("User not found.", MessageTone::Error);
        assert!(html.contains("message--error"));
        assert!(html.contains(r#"role="status""#));
        assert!(html.contains("User not found."));
        assert!(!html.contains("<article"));

        let hostile = render_message("<b>bold?</b>", MessageTone::Info);
        assert!(!hostile.contains("<b>"));
        assert!(hostile.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_loading_message_wraps_escaped_login() {
        let html = render_loading("<cat>");
        assert!(html.contains("Loading profile for <strong>&lt;cat&gt;</strong>…"));
    }
}

#[cfg(test)]
mod timeline_tests {
    use crate::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn card_counts(target: StepTarget) -> usize {
        match target {
            StepTarget::Card | StepTarget::Avatar => 1,
            StepTarget::Stats => 3,
            StepTarget::LinkButtons => 4,
            StepTarget::Message => 0,
        }
    }

    #[test]
    fn test_profile_steps_overlap_but_stay_ordered() {
        let scheduled = resolve(&profile_sequence(), card_counts);

        let start_of = |target: StepTarget| {
            scheduled
                .iter()
                .filter(|a| a.target == target)
                .map(|a| a.start)
                .fold(f64::INFINITY, f64::min)
        };
        let end_of = |target: StepTarget| {
            scheduled
                .iter()
                .filter(|a| a.target == target)
                .map(|a| a.start + a.duration)
                .fold(0.0, f64::max)
        };

        let order = [
            StepTarget::Card,
            StepTarget::Avatar,
            StepTarget::Stats,
            StepTarget::LinkButtons,
        ];
        for pair in order.windows(2) {
            // Strictly ordered starts...
            assert!(start_of(pair[0]) < start_of(pair[1]));
            // ...yet each step begins before the previous one has finished.
            assert!(start_of(pair[1]) < end_of(pair[0]));
        }
    }

    #[test]
    fn test_profile_step_starts_match_the_negative_offsets() {
        let scheduled = resolve(&profile_sequence(), card_counts);

        let avatar = scheduled
            .iter()
            .find(|a| a.target == StepTarget::Avatar)
            .unwrap();
        assert!(approx(avatar.start, 0.20));

        let first_stat = scheduled
            .iter()
            .find(|a| a.target == StepTarget::Stats && a.item == 0)
            .unwrap();
        assert!(approx(first_stat.start, 0.50));

        // Stats advance the timeline to 0.50 + 0.35 + 2 * 0.08 = 1.01;
        // links reach back 0.28 from there.
        let first_link = scheduled
            .iter()
            .find(|a| a.target == StepTarget::LinkButtons && a.item == 0)
            .unwrap();
        assert!(approx(first_link.start, 0.73));
    }

    #[test]
    fn test_staggered_items_are_evenly_spaced() {
        let scheduled = resolve(&profile_sequence(), card_counts);
        let stats: Vec<f64> = scheduled
            .iter()
            .filter(|a| a.target == StepTarget::Stats)
            .map(|a| a.start)
            .collect();
        assert_eq!(stats.len(), 3);
        assert!(approx(stats[1] - stats[0], 0.08));
        assert!(approx(stats[2] - stats[1], 0.08));
    }

    #[test]
    fn test_steps_with_no_elements_are_skipped() {
        let scheduled = resolve(&profile_sequence(), |target| match target {
            StepTarget::Card | StepTarget::Avatar => 1,
            StepTarget::Stats => 3,
            _ => 0,
        });
        assert!(scheduled
            .iter()
            .all(|a| a.target != StepTarget::LinkButtons));
        // One card, one avatar, three stats.
        assert_eq!(scheduled.len(), 5);
    }

    #[test]
    fn test_message_sequence_is_a_single_drop_in() {
        let scheduled = resolve(&message_sequence(), |_| 1);
        assert_eq!(scheduled.len(), 1);
        assert!(approx(scheduled[0].start, 0.0));
        assert!(approx(scheduled[0].from.y, -10.0));
        assert!(approx(scheduled[0].from.opacity, 0.0));
    }

    #[test]
    fn test_first_step_never_starts_before_zero() {
        let steps = vec![EntranceStep {
            target: StepTarget::Message,
            from: FromState::offset(-10.0),
            duration: 0.3,
            overlap: 5.0,
            stagger: 0.0,
            easing: Easing::QuadOut,
        }];
        let scheduled = resolve(&steps, |_| 1);
        assert!(approx(scheduled[0].start, 0.0));
    }
}
