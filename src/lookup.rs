// 2-digit HS category descriptions.
//
// The descriptions normally come from an `hs_lookup.csv` next to the input
// data. When that file is absent we fall back to a built-in table of the
// standard chapter titles. A code missing from the table is not an error; the
// description cell is simply left blank.
use crate::error::{ReportError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawLookupRow {
    #[serde(rename = "HS Code")]
    hs_code: Option<String>,
    #[serde(rename = "HS Code Description")]
    description: Option<String>,
}

// Harmonized System chapter titles, abbreviated. Chapter 77 is reserved.
static HS_CHAPTERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("01", "Live animals"),
        ("02", "Meat and edible meat offal"),
        ("03", "Fish and crustaceans"),
        ("04", "Dairy produce; eggs; honey"),
        ("05", "Products of animal origin"),
        ("06", "Live trees and other plants"),
        ("07", "Edible vegetables"),
        ("08", "Edible fruit and nuts"),
        ("09", "Coffee, tea, mate and spices"),
        ("10", "Cereals"),
        ("11", "Milling products; malt; starches"),
        ("12", "Oil seeds and oleaginous fruits"),
        ("13", "Lac; gums, resins"),
        ("14", "Vegetable plaiting materials"),
        ("15", "Animal or vegetable fats and oils"),
        ("16", "Preparations of meat or fish"),
        ("17", "Sugars and sugar confectionery"),
        ("18", "Cocoa and cocoa preparations"),
        ("19", "Preparations of cereals, flour or milk"),
        ("20", "Preparations of vegetables or fruit"),
        ("21", "Miscellaneous edible preparations"),
        ("22", "Beverages, spirits and vinegar"),
        ("23", "Food industry residues; animal feed"),
        ("24", "Tobacco and manufactured tobacco substitutes"),
        ("25", "Salt; sulphur; earths and stone"),
        ("26", "Ores, slag and ash"),
        ("27", "Mineral fuels and oils"),
        ("28", "Inorganic chemicals"),
        ("29", "Organic chemicals"),
        ("30", "Pharmaceutical products"),
        ("31", "Fertilisers"),
        ("32", "Tanning or dyeing extracts; paints"),
        ("33", "Essential oils; perfumery and cosmetics"),
        ("34", "Soap; washing and lubricating preparations"),
        ("35", "Albuminoidal substances; glues; enzymes"),
        ("36", "Explosives; pyrotechnic products"),
        ("37", "Photographic or cinematographic goods"),
        ("38", "Miscellaneous chemical products"),
        ("39", "Plastics and articles thereof"),
        ("40", "Rubber and articles thereof"),
        ("41", "Raw hides and skins; leather"),
        ("42", "Articles of leather; travel goods"),
        ("43", "Furskins and artificial fur"),
        ("44", "Wood and articles of wood"),
        ("45", "Cork and articles of cork"),
        ("46", "Manufactures of straw or other plaiting materials"),
        ("47", "Pulp of wood"),
        ("48", "Paper and paperboard"),
        ("49", "Printed books, newspapers, pictures"),
        ("50", "Silk"),
        ("51", "Wool; animal hair"),
        ("52", "Cotton"),
        ("53", "Other vegetable textile fibres"),
        ("54", "Man-made filaments"),
        ("55", "Man-made staple fibres"),
        ("56", "Wadding, felt and nonwovens; ropes"),
        ("57", "Carpets and other textile floor coverings"),
        ("58", "Special woven fabrics; lace; embroidery"),
        ("59", "Impregnated or coated textile fabrics"),
        ("60", "Knitted or crocheted fabrics"),
        ("61", "Apparel, knitted or crocheted"),
        ("62", "Apparel, not knitted or crocheted"),
        ("63", "Other made up textile articles"),
        ("64", "Footwear, gaiters and the like"),
        ("65", "Headgear and parts thereof"),
        ("66", "Umbrellas, walking-sticks, whips"),
        ("67", "Prepared feathers; artificial flowers"),
        ("68", "Articles of stone, plaster, cement"),
        ("69", "Ceramic products"),
        ("70", "Glass and glassware"),
        ("71", "Pearls, precious stones and metals"),
        ("72", "Iron and steel"),
        ("73", "Articles of iron or steel"),
        ("74", "Copper and articles thereof"),
        ("75", "Nickel and articles thereof"),
        ("76", "Aluminium and articles thereof"),
        ("78", "Lead and articles thereof"),
        ("79", "Zinc and articles thereof"),
        ("80", "Tin and articles thereof"),
        ("81", "Other base metals; cermets"),
        ("82", "Tools, implements, cutlery of base metal"),
        ("83", "Miscellaneous articles of base metal"),
        ("84", "Machinery and mechanical appliances"),
        ("85", "Electrical machinery and equipment"),
        ("86", "Railway locomotives and rolling stock"),
        ("87", "Vehicles other than railway stock"),
        ("88", "Aircraft, spacecraft"),
        ("89", "Ships, boats and floating structures"),
        ("90", "Optical, measuring and medical instruments"),
        ("91", "Clocks and watches"),
        ("92", "Musical instruments"),
        ("93", "Arms and ammunition"),
        ("94", "Furniture; bedding; lamps"),
        ("95", "Toys, games and sports requisites"),
        ("96", "Miscellaneous manufactured articles"),
        ("97", "Works of art, collectors' pieces, antiques"),
    ])
});

#[derive(Debug, Clone)]
pub struct HsLookup {
    map: HashMap<String, String>,
}

impl HsLookup {
    /// Built-in chapter titles.
    pub fn builtin() -> Self {
        Self {
            map: HS_CHAPTERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let rdr = csv::Reader::from_path(path).map_err(|e| ReportError::csv(path, e))?;
        Self::from_reader(rdr, &path.display().to_string())
    }

    pub fn from_reader<R: io::Read>(mut rdr: csv::Reader<R>, source: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (idx, result) in rdr.deserialize::<RawLookupRow>().enumerate() {
            let line = idx as u64 + 2;
            let row = result
                .map_err(|e| ReportError::schema(source, line, "HS Code", e.to_string()))?;
            let code = row.hs_code.unwrap_or_default().trim().to_string();
            if code.is_empty() {
                continue;
            }
            map.insert(code, row.description.unwrap_or_default().trim().to_string());
        }
        Ok(Self { map })
    }

    /// Load the lookup from an explicit path, from `hs_lookup.csv` in the
    /// working directory, or fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(p) = path {
            return Self::from_csv_path(p);
        }
        let default = Path::new("hs_lookup.csv");
        if default.exists() {
            Self::from_csv_path(default)
        } else {
            tracing::info!("hs_lookup.csv not found, using built-in chapter titles");
            Ok(Self::builtin())
        }
    }

    pub fn describe(&self, code: &str) -> Option<&str> {
        self.map.get(code).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_common_chapters() {
        let lookup = HsLookup::builtin();
        assert_eq!(lookup.describe("85"), Some("Electrical machinery and equipment"));
        assert_eq!(lookup.describe("77"), None); // reserved chapter
    }

    #[test]
    fn reads_csv_and_leaves_unknown_codes_blank() {
        let data = "HS Code,HS Code Description\n01,Live animals\n02,Meat\n";
        let rdr = csv::Reader::from_reader(data.as_bytes());
        let lookup = HsLookup::from_reader(rdr, "inline").unwrap();
        assert_eq!(lookup.describe("02"), Some("Meat"));
        assert_eq!(lookup.describe("99"), None);
    }
}
