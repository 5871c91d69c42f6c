//! Device classification from the `User-Agent` header.

/// Device class that drives the redirect branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    IPad,
    IPhone,
    Android,
    Web,
}

impl DeviceClass {
    /// Classifies a raw `User-Agent` value by case-sensitive substring match.
    ///
    /// `iPad` is checked before `iPhone`, which is checked before `Android`.
    /// Anything without a known marker is [`DeviceClass::Web`].
    pub fn from_user_agent(user_agent: &str) -> Self {
        if user_agent.contains("iPad") {
            Self::IPad
        } else if user_agent.contains("iPhone") {
            Self::IPhone
        } else if user_agent.contains("Android") {
            Self::Android
        } else {
            Self::Web
        }
    }

    pub fn is_ios(self) -> bool {
        matches!(self, Self::IPad | Self::IPhone)
    }

    pub fn is_mobile(self) -> bool {
        self != Self::Web
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IPad => "ipad",
            Self::IPhone => "iphone",
            Self::Android => "android",
            Self::Web => "web",
        }
    }
}
