use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RawRoute {
    #[serde(alias = "Route_Name")]
    pub route_name: String,
    #[serde(alias = "Route_Numb")]
    pub route_number: String,
    #[serde(alias = "Route_Type")]
    pub route_type: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RawStop {
    pub stop_id: String,
    /// Northing or latitude
    #[serde(alias = "Y")]
    pub y: String,
    /// Easting or longitude
    #[serde(alias = "X")]
    pub x: String,
    #[serde(alias = "Routes_Ser")]
    pub routes_served: String,
}
