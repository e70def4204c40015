use bitflags::bitflags;

use crate::constants::REGISTER_TAPS;

bitflags! {
    // Control/status register (CSR)
    //
    // 31      18          5    4    3    2    1    0
    // ....    TCLR  ....  HALT C3EN C2EN C1EN C0EN FEN
    //         |           |    +----+----+----+--- per-tap enable
    //         |           +--- hold the filter while reconfiguring
    //         +--- write 1 then 0 to clear the delay line
    //
    // Bits not listed here are carried through untouched.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[must_use]
    pub struct ControlWord: u32 {
        const FEN = 1 << 0;
        const C0EN = 1 << 1;
        const C1EN = 1 << 2;
        const C2EN = 1 << 3;
        const C3EN = 1 << 4;
        const HALT = 1 << 5;
        const TCLR = 1 << 18;
    }
}

impl ControlWord {
    /// Tap-enable flags, indexed by tap
    pub const TAP_ENABLES: [ControlWord; REGISTER_TAPS] =
        [Self::C0EN, Self::C1EN, Self::C2EN, Self::C3EN];

    /// Wrap a raw register value, keeping unknown bits
    pub const fn from_register(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Copy of this word with `flag` set or cleared
    pub fn with(self, flag: ControlWord, value: bool) -> Self {
        let mut word = self;
        word.set(flag, value);
        word
    }

    /// Copy of this word with bit `1 + i` matching `enables[i]`
    pub fn with_tap_enables(self, enables: [bool; REGISTER_TAPS]) -> Self {
        enables
            .iter()
            .zip(Self::TAP_ENABLES)
            .fold(self, |word, (&enabled, flag)| word.with(flag, enabled))
    }

    #[must_use]
    pub fn tap_enabled(self, tap: usize) -> bool {
        Self::TAP_ENABLES
            .get(tap)
            .is_some_and(|&flag| self.contains(flag))
    }

    /// The two states of a TCLR pulse: asserted, then released
    pub fn tclr_pulse(self) -> [Self; 2] {
        [self.with(Self::TCLR, true), self.with(Self::TCLR, false)]
    }
}

/// A single register write in a device configuration sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStep {
    WriteCsr(ControlWord),
    WriteCoef(u32),
}

/// Register writes that load a new filter into the device
///
/// Starting from `base`: assert HALT, write the packed coefficients, match
/// the tap-enable bits to `enables`, pulse TCLR, release HALT, assert FEN.
pub fn configuration_sequence(
    base: ControlWord,
    coef: u32,
    enables: [bool; REGISTER_TAPS],
) -> Vec<ControlStep> {
    let halted = base.with(ControlWord::HALT, true);
    let taps_set = halted.with_tap_enables(enables);
    let [clearing, cleared] = taps_set.tclr_pulse();
    let released = cleared.with(ControlWord::HALT, false);
    let running = released.with(ControlWord::FEN, true);

    vec![
        ControlStep::WriteCsr(halted),
        ControlStep::WriteCoef(coef),
        ControlStep::WriteCsr(taps_set),
        ControlStep::WriteCsr(clearing),
        ControlStep::WriteCsr(cleared),
        ControlStep::WriteCsr(released),
        ControlStep::WriteCsr(running),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_positions() {
        assert_eq!(ControlWord::FEN.bits(), 0x0000_0001);
        assert_eq!(ControlWord::C0EN.bits(), 0x0000_0002);
        assert_eq!(ControlWord::C3EN.bits(), 0x0000_0010);
        assert_eq!(ControlWord::HALT.bits(), 0x0000_0020);
        assert_eq!(ControlWord::TCLR.bits(), 0x0004_0000);
    }

    #[test]
    fn test_enable_then_fen_then_pulse() {
        let word = ControlWord::empty().with_tap_enables([true, false, true, false]);
        assert_eq!(word.bits(), 0x0000_000A);

        let word = word.with(ControlWord::FEN, true);
        assert_eq!(word.bits(), 0x0000_000B);

        let [set, cleared] = word.tclr_pulse();
        assert_eq!(set.bits(), 0x0004_000B);
        assert_eq!(cleared, word);
    }

    #[test]
    fn test_tap_enables_clear_stale_bits() {
        let word = ControlWord::from_register(0x1E);
        let word = word.with_tap_enables([false, true, false, false]);
        assert_eq!(word.bits(), 0x04);
        assert!(word.tap_enabled(1));
        assert!(!word.tap_enabled(0));
        assert!(!word.tap_enabled(7));
    }

    #[test]
    fn test_unknown_bits_preserved() {
        let word = ControlWord::from_register(0x8000_0100);
        let word = word.with(ControlWord::HALT, true).with(ControlWord::FEN, true);
        assert_eq!(word.bits(), 0x8000_0121);
    }

    #[test]
    fn test_configuration_sequence_order() {
        let steps = configuration_sequence(
            ControlWord::empty(),
            0x0000_2010,
            [true, true, false, false],
        );
        let expected = vec![
            ControlStep::WriteCsr(ControlWord::from_register(0x20)),
            ControlStep::WriteCoef(0x0000_2010),
            ControlStep::WriteCsr(ControlWord::from_register(0x26)),
            ControlStep::WriteCsr(ControlWord::from_register(0x0004_0026)),
            ControlStep::WriteCsr(ControlWord::from_register(0x26)),
            ControlStep::WriteCsr(ControlWord::from_register(0x06)),
            ControlStep::WriteCsr(ControlWord::from_register(0x07)),
        ];
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_configuration_sequence_from_running_device() {
        // Previously running with taps 0..3 enabled
        let base = ControlWord::from_register(0x1F);
        let steps = configuration_sequence(base, 0, [false, false, false, true]);
        assert_eq!(steps[0], ControlStep::WriteCsr(ControlWord::from_register(0x3F)));
        assert_eq!(
            steps.last(),
            Some(&ControlStep::WriteCsr(ControlWord::from_register(0x11)))
        );
    }
}
