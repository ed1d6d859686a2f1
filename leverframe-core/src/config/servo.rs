//! Per-servo configuration record
//!
//! Each servo slot has one fixed-size record in persistent storage:
//!
//! ```text
//! offset  0       1       2     3     4      5         6       7..11
//!         limit1  limit2  type  swap  speed  hesitate  bounce  reserved
//! ```
//!
//! A `type` byte of `0xFF` marks a slot that was never configured, which is
//! exactly what blank storage reads back as. Unconfigured slots always
//! encode back to an all-`0xFF` record, so saving never touches them.

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 11;

/// On-disk value of an unconfigured slot's type byte
pub const UNCONFIGURED_TYPE: u8 = 0xFF;

/// Angle both limits start from when a servo is first set up
pub const CENTRE_ANGLE: u8 = 90;

/// Motion profile of a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoType {
    /// Never configured; switch edges are ignored
    #[default]
    Unconfigured,
    /// Track point: single sweep between limits
    Point,
    /// Signal arm: asymmetric speeds with optional bounce and hesitate
    Semaphore,
    /// Slow mechanism (gates, doors): single sweep with its own speed table
    Sweep,
    /// Plain on/off output for auxiliary switching hardware
    OnOff,
}

impl ServoType {
    /// Types offered when setting up a servo, in menu order
    pub const SELECTABLE: [ServoType; 4] = [
        ServoType::Point,
        ServoType::Semaphore,
        ServoType::Sweep,
        ServoType::OnOff,
    ];

    /// Decode the on-disk type byte
    ///
    /// Anything that is not a known profile is treated as unconfigured.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            0 => ServoType::Point,
            1 => ServoType::Semaphore,
            2 => ServoType::Sweep,
            3 => ServoType::OnOff,
            _ => ServoType::Unconfigured,
        }
    }

    /// Encode as the on-disk type byte
    pub const fn to_byte(self) -> u8 {
        match self {
            ServoType::Point => 0,
            ServoType::Semaphore => 1,
            ServoType::Sweep => 2,
            ServoType::OnOff => 3,
            ServoType::Unconfigured => UNCONFIGURED_TYPE,
        }
    }

    /// Look up a type by its position in [`ServoType::SELECTABLE`]
    pub fn from_menu_index(index: u8) -> Self {
        Self::SELECTABLE
            .get(index as usize)
            .copied()
            .unwrap_or(ServoType::Point)
    }

    /// Position in [`ServoType::SELECTABLE`], if any
    pub fn menu_index(self) -> Option<u8> {
        Self::SELECTABLE
            .iter()
            .position(|&t| t == self)
            .map(|i| i as u8)
    }

    /// Whether this is a real motion profile
    pub const fn is_selectable(self) -> bool {
        !matches!(self, ServoType::Unconfigured)
    }

    /// Whether the servo arm physically moves between two limits
    pub const fn has_limits(self) -> bool {
        matches!(
            self,
            ServoType::Point | ServoType::Semaphore | ServoType::Sweep
        )
    }

    /// Whether the speed setting applies to this type
    pub const fn has_speed(self) -> bool {
        matches!(self, ServoType::Point | ServoType::Sweep)
    }
}

/// Configuration of one servo slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Angle for the "switch off" position (0-180)
    pub limit1: u8,
    /// Angle for the "switch on" position (0-180)
    pub limit2: u8,
    /// Motion profile
    pub servo_type: ServoType,
    /// Invert which switch state maps to which limit
    pub swap: bool,
    /// Index into the Point/Sweep speed table (0-3)
    pub speed: u8,
    /// Semaphore: pause halfway when dropping the arm
    pub hesitate: bool,
    /// Semaphore: bounce the arm after raising it
    pub bounce: bool,
    /// Spare bytes, preserved as read
    pub reserved: [u8; 4],
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::UNCONFIGURED
    }
}

impl ServoConfig {
    /// What a slot decodes to from blank storage
    pub const UNCONFIGURED: Self = Self {
        limit1: 0xFF,
        limit2: 0xFF,
        servo_type: ServoType::Unconfigured,
        swap: false,
        speed: 0,
        hesitate: false,
        bounce: false,
        reserved: [0xFF; 4],
    };

    /// Create a configured servo with default options
    pub const fn new(servo_type: ServoType, limit1: u8, limit2: u8) -> Self {
        Self {
            limit1,
            limit2,
            servo_type,
            swap: false,
            speed: 0,
            hesitate: false,
            bounce: false,
            reserved: [0; 4],
        }
    }

    /// Decode a record
    ///
    /// A record with an unknown type byte decodes to [`Self::UNCONFIGURED`]
    /// whatever its other bytes hold.
    pub const fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
        let servo_type = ServoType::from_byte(bytes[2]);
        if !servo_type.is_selectable() {
            return Self::UNCONFIGURED;
        }
        Self {
            limit1: bytes[0],
            limit2: bytes[1],
            servo_type,
            swap: bytes[3] != 0,
            speed: bytes[4],
            hesitate: bytes[5] != 0,
            bounce: bytes[6] != 0,
            reserved: [bytes[7], bytes[8], bytes[9], bytes[10]],
        }
    }

    /// Encode as a record
    pub const fn encode(&self) -> [u8; RECORD_SIZE] {
        if !self.servo_type.is_selectable() {
            return [0xFF; RECORD_SIZE];
        }
        [
            self.limit1,
            self.limit2,
            self.servo_type.to_byte(),
            self.swap as u8,
            self.speed,
            self.hesitate as u8,
            self.bounce as u8,
            self.reserved[0],
            self.reserved[1],
            self.reserved[2],
            self.reserved[3],
        ]
    }

    /// Whether switch edges should move this servo
    pub const fn is_configured(&self) -> bool {
        self.servo_type.is_selectable()
    }

    /// Reset the behavioural options to their defaults
    ///
    /// Limits and reserved bytes are left alone.
    pub fn reset_options(&mut self) {
        self.swap = false;
        self.speed = 0;
        self.hesitate = false;
        self.bounce = false;
    }
}
