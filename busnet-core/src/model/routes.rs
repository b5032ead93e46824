/// Bus route as listed in the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Normalized route token, matched against stop `routes_served`
    pub route_number: String,
    pub route_name: String,
    pub category: RouteCategory,
}

impl Route {
    pub fn new(
        route_number: impl Into<String>,
        route_name: impl Into<String>,
        category: RouteCategory,
    ) -> Self {
        Self {
            route_number: route_number.into(),
            route_name: route_name.into(),
            category,
        }
    }

    /// Display color of transit edges generated for this route
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

/// Service category of a route, parsed from the free-text `route_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteCategory {
    Commuter,
    CityLink(CityLinkLine),
    Express,
    Local,
    /// Any route type not listed above
    Other,
}

impl RouteCategory {
    pub const COMMUTER: &'static str = "MTA Commuter Bus";
    pub const CITYLINK: &'static str = "MTA Local Bus - CityLink";
    pub const EXPRESS: &'static str = "MTA Local Bus - Express BusLink";
    pub const LOCAL: &'static str = "MTA Local Bus - LocalLink";

    /// Parse a `route_type` cell; CityLink routes take their line from the
    /// normalized route number
    pub fn parse(route_type: &str, route_number: &str) -> Self {
        match route_type.trim() {
            Self::COMMUTER => Self::Commuter,
            Self::CITYLINK => Self::CityLink(CityLinkLine::parse(route_number)),
            Self::EXPRESS => Self::Express,
            Self::LOCAL => Self::Local,
            _ => Self::Other,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Commuter => "#4b0082",
            Self::CityLink(line) => line.color(),
            Self::Express => "#ffd700",
            Self::Local | Self::Other => "#2ca02c",
        }
    }
}

/// Color-named CityLink lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CityLinkLine {
    Blue,
    Brown,
    Gold,
    Green,
    Lime,
    Navy,
    Orange,
    Pink,
    Purple,
    Red,
    Silver,
    Yellow,
    Unrecognized,
}

impl CityLinkLine {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "BLUE" => Self::Blue,
            "BROWN" => Self::Brown,
            "GOLD" => Self::Gold,
            "GREEN" => Self::Green,
            "LIME" => Self::Lime,
            "NAVY" => Self::Navy,
            "ORANGE" => Self::Orange,
            "PINK" => Self::Pink,
            "PURPLE" => Self::Purple,
            "RED" => Self::Red,
            "SILVER" => Self::Silver,
            "YELLOW" => Self::Yellow,
            _ => Self::Unrecognized,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Blue => "#1f77b4",
            Self::Brown => "#8c564b",
            Self::Gold => "#ff7f0e",
            Self::Green => "#2ca02c",
            Self::Lime => "#00ff00",
            Self::Navy => "#000080",
            Self::Orange => "#d62728",
            Self::Pink => "#ff69b4",
            Self::Purple => "#9467bd",
            Self::Red => "#ff0000",
            Self::Silver => "#c0c0c0",
            Self::Yellow => "#ffff00",
            Self::Unrecognized => "#dddddd",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citylink_color_follows_line_name() {
        let category = RouteCategory::parse("MTA Local Bus - CityLink", "navy");
        assert_eq!(category, RouteCategory::CityLink(CityLinkLine::Navy));
        assert_eq!(category.color(), "#000080");
    }

    #[test]
    fn unknown_citylink_line_uses_fallback() {
        let category = RouteCategory::parse("MTA Local Bus - CityLink", "TEAL");
        assert_eq!(category.color(), "#dddddd");
    }

    #[test]
    fn unknown_route_type_uses_default_color() {
        let route = Route::new("99", "Shuttle", RouteCategory::parse("Shuttle", "99"));
        assert_eq!(route.category, RouteCategory::Other);
        assert_eq!(route.color(), "#2ca02c");
        assert_eq!(
            RouteCategory::parse("MTA Commuter Bus", "410").color(),
            "#4b0082"
        );
        assert_eq!(
            RouteCategory::parse("MTA Local Bus - Express BusLink", "105").color(),
            "#ffd700"
        );
    }
}
