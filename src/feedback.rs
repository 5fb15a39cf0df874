use crate::game::GameState;

/// Pulse wave voice.
pub const CHANNEL_PULSE1: u32 = 0;
pub const CHANNEL_TRIANGLE: u32 = 2;
/// Third duty-cycle mode, or'ed into the channel flags.
pub const MODE_3: u32 = 8;

/// A single sound effect request.
///
/// `frequency` packs a start frequency in the low 16 bits and an optional
/// slide target in the high 16 bits. `envelope` packs sustain, release,
/// decay and attack frame counts from the low byte up.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Tone {
    pub frequency: u32,
    pub envelope: u32,
    pub volume: u32,
    pub channel: u32,
}

/// Gameplay events that make a sound.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cue {
    Move,
    Eat,
    Extend,
    GameOver,
}

impl Cue {
    #[must_use]
    pub fn tone(self) -> Tone {
        match self {
            Self::Move => Tone {
                frequency: 400,
                envelope: 1,
                volume: 30,
                channel: CHANNEL_TRIANGLE | MODE_3,
            },
            Self::Eat => Tone {
                frequency: 262,
                envelope: 5,
                volume: 50,
                channel: CHANNEL_PULSE1 | MODE_3,
            },
            Self::Extend | Self::GameOver => Tone {
                frequency: 250 | (523 << 16),
                envelope: 20 | (20 << 8) | (10 << 24),
                volume: 30,
                channel: CHANNEL_PULSE1,
            },
        }
    }
}

/// Presentation side effects issued by the engine. Neither call reports
/// failure back.
pub trait Feedback {
    fn play_tone(&mut self, tone: Tone);
    fn draw_frame(&mut self, state: &GameState);
}

#[cfg(test)]
mod tests {
    use super::{CHANNEL_TRIANGLE, Cue, MODE_3};

    #[test]
    fn slide_tones_pack_both_frequencies() {
        let tone = Cue::GameOver.tone();

        assert_eq!(tone.frequency & 0xFFFF, 250);
        assert_eq!(tone.frequency >> 16, 523);
        assert_eq!(tone.envelope >> 24, 10);
        assert_eq!(Cue::Extend.tone(), tone);
    }

    #[test]
    fn move_tone_is_a_short_triangle_blip() {
        let tone = Cue::Move.tone();

        assert_eq!(tone.channel, CHANNEL_TRIANGLE | MODE_3);
        assert_eq!(tone.envelope, 1);
    }
}
