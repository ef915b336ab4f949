//! Entrance-animation sequencing.
//!
//! Sequences are plain data. Resolving one against the number of elements
//! each step targets yields absolute start times for a runner to schedule.
//! Each step is anchored a fixed offset before the end of the timeline
//! built so far, so steps overlap rather than running fully sequentially
//! or fully in parallel.

/// Easing curves used by the entrance sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    QuadOut,
    CubicOut,
    QuartOut,
    BackOut,
}

impl Easing {
    /// CSS timing-function equivalent, for runners that schedule through
    /// stylesheet-level animation facilities.
    pub fn css(self) -> &'static str {
        match self {
            Easing::QuadOut => "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
            Easing::CubicOut => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            Easing::QuartOut => "cubic-bezier(0.165, 0.84, 0.44, 1)",
            Easing::BackOut => "cubic-bezier(0.175, 0.885, 0.32, 1.275)",
        }
    }
}

/// Visual state an element enters from. Elements always rest at their
/// natural layout state once the transition finishes (or immediately, when
/// no animation facility is available).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FromState {
    /// Vertical offset in pixels.
    pub y: f64,
    pub scale: Option<f64>,
    pub opacity: f64,
}

impl FromState {
    pub const fn offset(y: f64) -> Self {
        Self {
            y,
            scale: None,
            opacity: 0.0,
        }
    }

    pub const fn scaled(scale: f64) -> Self {
        Self {
            y: 0.0,
            scale: Some(scale),
            opacity: 0.0,
        }
    }
}

/// What a step animates, as a selector scoped to the display area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTarget {
    Message,
    Card,
    Avatar,
    Stats,
    LinkButtons,
}

impl StepTarget {
    pub fn selector(self) -> &'static str {
        match self {
            StepTarget::Message => ".message",
            StepTarget::Card => "#profileCard",
            StepTarget::Avatar => ".avatar",
            StepTarget::Stats => ".stat",
            StepTarget::LinkButtons => ".links .link-btn",
        }
    }
}

/// One step of an entrance sequence. Durations and offsets are in seconds.
#[derive(Debug, Clone, Copy)]
pub struct EntranceStep {
    pub target: StepTarget,
    pub from: FromState,
    pub duration: f64,
    /// How far this step's start reaches back before the end of the
    /// timeline built so far.
    pub overlap: f64,
    /// Delay between successive elements when the target matches several.
    pub stagger: f64,
    pub easing: Easing,
}

/// Entrance for a status message: a short drop-in from above.
pub fn message_sequence() -> Vec<EntranceStep> {
    vec![EntranceStep {
        target: StepTarget::Message,
        from: FromState::offset(-10.0),
        duration: 0.45,
        overlap: 0.0,
        stagger: 0.0,
        easing: Easing::CubicOut,
    }]
}

/// Entrance for a freshly rendered profile card: the container rises in,
/// the avatar pops, then the statistic and link groups stagger in, each
/// step overlapping the tail of the previous one.
pub fn profile_sequence() -> Vec<EntranceStep> {
    vec![
        EntranceStep {
            target: StepTarget::Card,
            from: FromState::offset(18.0),
            duration: 0.45,
            overlap: 0.0,
            stagger: 0.0,
            easing: Easing::QuartOut,
        },
        EntranceStep {
            target: StepTarget::Avatar,
            from: FromState::scaled(0.85),
            duration: 0.5,
            overlap: 0.25,
            stagger: 0.0,
            easing: Easing::BackOut,
        },
        EntranceStep {
            target: StepTarget::Stats,
            from: FromState::offset(8.0),
            duration: 0.35,
            overlap: 0.2,
            stagger: 0.08,
            easing: Easing::QuadOut,
        },
        EntranceStep {
            target: StepTarget::LinkButtons,
            from: FromState::offset(6.0),
            duration: 0.28,
            overlap: 0.28,
            stagger: 0.06,
            easing: Easing::QuadOut,
        },
    ]
}

/// A single scheduled element animation. `start` is in seconds from the
/// beginning of the sequence.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledAnimation {
    pub target: StepTarget,
    /// Index of the element within the step's target set.
    pub item: usize,
    pub start: f64,
    pub duration: f64,
    pub from: FromState,
    pub easing: Easing,
}

/// Resolves a sequence against the number of elements each target matches.
///
/// A step starts at (timeline end − overlap), clamped at zero; a staggered
/// step of n elements advances the timeline end by
/// duration + stagger · (n − 1). Steps matching no elements are skipped
/// without advancing the timeline.
pub fn resolve(
    steps: &[EntranceStep],
    count_for: impl Fn(StepTarget) -> usize,
) -> Vec<ScheduledAnimation> {
    let mut scheduled = Vec::new();
    let mut timeline_end = 0.0f64;

    for step in steps {
        let count = count_for(step.target);
        if count == 0 {
            continue;
        }
        let start = (timeline_end - step.overlap).max(0.0);
        for item in 0..count {
            scheduled.push(ScheduledAnimation {
                target: step.target,
                item,
                start: start + step.stagger * item as f64,
                duration: step.duration,
                from: step.from,
                easing: step.easing,
            });
        }
        let span = step.duration + step.stagger * (count - 1) as f64;
        timeline_end = timeline_end.max(start + span);
    }

    scheduled
}
