//! Property tests for the countdown state machine.

use proptest::prelude::*;

use focused_brew::timer::{
    ClockSettings, Countdown, PomodoroSettings, Settings, TickOutcome, TimerMode,
};

#[derive(Debug, Clone)]
enum Command {
    Start,
    Pause,
    Reset,
    Apply,
    Tick(u16),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Start),
        Just(Command::Pause),
        Just(Command::Reset),
        Just(Command::Apply),
        (1u16..400).prop_map(Command::Tick),
    ]
}

fn settings() -> impl Strategy<Value = Settings> {
    (0u32..3, 0u32..5, 1u32..4, 1u32..3, 1u32..6, 0u32..5).prop_map(
        |(hours, minutes, work, short_break, long_break, every)| Settings {
            clock: ClockSettings::new(hours, minutes),
            // cadence deliberately allowed to be out of range
            pomodoro: PomodoroSettings {
                work_minutes: work,
                short_break_minutes: short_break,
                long_break_minutes: long_break,
                sessions_before_long_break: every,
            },
        },
    )
}

fn mode() -> impl Strategy<Value = TimerMode> {
    prop_oneof![Just(TimerMode::Default), Just(TimerMode::Pomodoro)]
}

fn assert_invariants(countdown: &Countdown) {
    assert!(countdown.remaining_seconds() <= countdown.total_seconds());
    if countdown.is_running() {
        assert!(countdown.remaining_seconds() > 0);
    }
    assert!(countdown.session_count() >= 1);
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(
        mode in mode(),
        settings in settings(),
        commands in proptest::collection::vec(command(), 1..40),
    ) {
        let mut countdown = Countdown::new(mode, settings);

        for command in commands {
            match command {
                Command::Start => { countdown.start(); }
                Command::Pause => { countdown.pause(); }
                Command::Reset => countdown.reset(),
                Command::Apply => { countdown.apply_settings(); }
                Command::Tick(n) => {
                    for _ in 0..n {
                        let before = countdown.remaining_seconds();
                        let outcome = countdown.tick();
                        match outcome {
                            TickOutcome::Ignored => {
                                prop_assert_eq!(countdown.remaining_seconds(), before);
                            }
                            TickOutcome::Continued => {
                                prop_assert_eq!(countdown.remaining_seconds(), before - 1);
                            }
                            TickOutcome::Completed => {
                                prop_assert_eq!(before, 1);
                                prop_assert_eq!(countdown.remaining_seconds(), 0);
                                prop_assert!(!countdown.is_running());
                            }
                            TickOutcome::SessionAdvanced { total_seconds, .. } => {
                                prop_assert_eq!(before, 1);
                                prop_assert_eq!(countdown.remaining_seconds(), total_seconds);
                                prop_assert!(countdown.is_running());
                            }
                        }
                        assert_invariants(&countdown);
                    }
                }
            }
            assert_invariants(&countdown);
        }
    }

    #[test]
    fn default_mode_never_restarts_itself(minutes in 1u32..5, extra in 0u64..100) {
        let mut countdown = Countdown::new(
            TimerMode::Default,
            Settings { clock: ClockSettings::new(0, minutes), ..Settings::default() },
        );
        countdown.start();
        let total = countdown.total_seconds();

        let mut last = countdown.remaining_seconds();
        for _ in 0..(total + extra) {
            countdown.tick();
            prop_assert!(countdown.remaining_seconds() <= last);
            last = countdown.remaining_seconds();
        }

        prop_assert_eq!(countdown.remaining_seconds(), 0);
        prop_assert!(!countdown.is_running());
    }
}
