//! Unit definitions - ~150 units and 29 prefixes organized by category

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::dimension::{self, Dimension};
use crate::temperature::{Scale, Thermal};
use crate::unit::{Atom, Prefix, PrefixId, PrefixScope, Unit, UnitId};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units and prefixes
pub struct UnitRegistry {
    units: Vec<Unit>,
    prefixes: Vec<Prefix>,
    /// Canonical name to unit
    names: HashMap<String, UnitId>,
    /// Symbol or alias to unit
    aliases: HashMap<String, UnitId>,
    /// Symbol or alias to prefix
    prefix_aliases: HashMap<String, PrefixId>,
    /// Prefix spellings, longest first
    prefix_order: Vec<(String, PrefixId)>,
    /// Absolute temperature unit of each scale
    temperatures: [UnitId; 4],
    /// Differential degree unit of each scale
    degrees: [UnitId; 4],
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: Vec::new(),
            prefixes: Vec::new(),
            names: HashMap::new(),
            aliases: HashMap::new(),
            prefix_aliases: HashMap::new(),
            prefix_order: Vec::new(),
            temperatures: [UnitId(0); 4],
            degrees: [UnitId(0); 4],
        };
        registry.register_all_prefixes();
        registry.register_all_units();

        let mut order: Vec<(String, PrefixId)> = registry
            .prefix_aliases
            .iter()
            .map(|(alias, id)| (alias.clone(), *id))
            .collect();
        order.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        registry.prefix_order = order;

        debug!(
            units = registry.units.len(),
            prefixes = registry.prefixes.len(),
            aliases = registry.aliases.len(),
            "unit registry built"
        );
        registry
    }

    /// Get a unit by symbol or alias (exact match, no prefixes)
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.lookup(symbol).map(|id| self.unit(id))
    }

    /// Get a prefix by symbol or alias
    pub fn get_prefix(&self, symbol: &str) -> Option<&Prefix> {
        self.prefix_aliases.get(symbol).map(|id| self.prefix(*id))
    }

    /// Exact symbol or alias match
    pub fn lookup(&self, symbol: &str) -> Option<UnitId> {
        self.aliases.get(symbol).copied()
    }

    /// Resolve a unit token, peeling a leading prefix if needed
    ///
    /// An exact alias always wins, so `min` is a minute rather than a
    /// milli-inch. Otherwise the longest prefix spelling whose remainder is a
    /// unit accepting that prefix is used. Prefixed units without a spelling
    /// that reads back as themselves are not recognized.
    pub fn resolve(&self, token: &str) -> Option<Atom> {
        if let Some(id) = self.lookup(token) {
            return Some(Atom::new(None, id));
        }
        let atom = self.peel(token)?;
        match atom.prefix {
            Some(prefix) if self.prefixed_symbol(prefix, atom.unit).is_none() => None,
            _ => Some(atom),
        }
    }

    /// Rendered symbol of a prefixed unit
    ///
    /// The prefix symbol joined with the first unit spelling that reads back
    /// as the same prefix and unit, so a milli-inch renders as `minch` since
    /// `min` is a minute.
    pub(crate) fn prefixed_symbol(&self, prefix: PrefixId, unit: UnitId) -> Option<String> {
        let atom = Atom::new(Some(prefix), unit);
        let prefix_symbol = self.prefix(prefix).symbol();
        self.unit(unit)
            .aliases
            .iter()
            .map(|alias| format!("{}{}", prefix_symbol, alias))
            .find(|spelling| self.lookup(spelling).is_none() && self.peel(spelling) == Some(atom))
    }

    fn peel(&self, token: &str) -> Option<Atom> {
        self.prefix_order.iter().find_map(|(spelling, prefix_id)| {
            let rest = token.strip_prefix(spelling.as_str())?;
            let unit_id = self.lookup(rest)?;
            if self.prefix(*prefix_id).applies_to(self.unit(unit_id)) {
                Some(Atom::new(Some(*prefix_id), unit_id))
            } else {
                None
            }
        })
    }

    /// Resolve a unit token into its prefix and unit definitions
    pub fn resolve_prefixed(&self, token: &str) -> Option<(Option<&Prefix>, &Unit)> {
        let atom = self.resolve(token)?;
        Some((atom.prefix.map(|id| self.prefix(id)), self.unit(atom.unit)))
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.0 as usize]
    }

    pub fn prefix(&self, id: PrefixId) -> &Prefix {
        &self.prefixes[id.0 as usize]
    }

    /// Absolute temperature unit of a scale (`tempC` for Celsius)
    pub fn temperature_unit(&self, scale: Scale) -> UnitId {
        self.temperatures[scale as usize]
    }

    /// Differential degree unit of a scale (`degC` for Celsius)
    pub fn degree_unit(&self, scale: Scale) -> UnitId {
        self.degrees[scale as usize]
    }

    /// Kind label of a signature
    pub fn kind_of(&self, dimension: &Dimension) -> String {
        dimension.kind()
    }

    /// All kind labels of the classification table
    pub fn kinds(&self) -> Vec<&'static str> {
        Dimension::kinds()
    }

    /// Output symbols of every unit defined with the given kind, sorted
    pub fn units_of_kind(&self, kind: &str) -> Vec<&str> {
        let mut symbols: Vec<&str> = self
            .units
            .iter()
            .skip(1)
            .filter(|u| u.kind == kind)
            .map(|u| u.symbol())
            .collect();
        symbols.sort_unstable();
        symbols
    }

    /// Every spelling of the unit or prefix known as `symbol`
    pub fn aliases(&self, symbol: &str) -> Option<Vec<&str>> {
        if let Some(unit) = self.get(symbol) {
            return Some(unit.aliases.iter().map(String::as_str).collect());
        }
        self.get_prefix(symbol)
            .map(|prefix| prefix.aliases.iter().map(String::as_str).collect())
    }

    /// Number of unit definitions, the dimensionless placeholder included
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // ========== Registration ==========

    fn register(&mut self, unit: Unit) -> UnitId {
        let id = UnitId(self.units.len() as u16);
        self.names.insert(unit.name.clone(), id);
        for alias in &unit.aliases {
            if let Some(previous) = self.aliases.insert(alias.clone(), id) {
                warn!(alias = %alias, previous = %self.unit(previous).name, "unit alias redefined");
            }
        }
        self.units.push(unit);
        id
    }

    fn id_of(&self, name: &str) -> Option<UnitId> {
        let id = self.names.get(name).copied();
        if id.is_none() {
            warn!(unit = name, "unknown unit in breakdown");
        }
        id
    }

    /// Register an irreducible unit along a base axis (or none, for
    /// dimensionless base units such as `each`)
    fn base(&mut self, name: &str, aliases: &[&str], kind: &str, axis: Option<usize>) -> UnitId {
        let dimension = axis.map(Dimension::axis).unwrap_or_default();
        self.register(Unit {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            kind: kind.to_string(),
            scalar: 1.0,
            numerator: Vec::new(),
            denominator: Vec::new(),
            base: true,
            dimension,
            thermal: None,
            prefixable: true,
        })
    }

    /// Register a derived unit from its factor and base breakdown
    fn derived(
        &mut self,
        name: &str,
        aliases: &[&str],
        kind: &str,
        scalar: f64,
        numerator: &[&str],
        denominator: &[&str],
    ) -> UnitId {
        let numerator: Vec<UnitId> = numerator.iter().filter_map(|n| self.id_of(n)).collect();
        let denominator: Vec<UnitId> = denominator.iter().filter_map(|n| self.id_of(n)).collect();
        let mut dimension = Dimension::DIMENSIONLESS;
        for id in &numerator {
            dimension = dimension.multiply(&self.unit(*id).dimension);
        }
        for id in &denominator {
            dimension = dimension.divide(&self.unit(*id).dimension);
        }
        self.register(Unit {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            kind: kind.to_string(),
            scalar,
            numerator,
            denominator,
            base: false,
            dimension,
            thermal: None,
            prefixable: true,
        })
    }

    /// Units that never take a prefix
    fn fixed(&mut self, id: UnitId) {
        self.units[id.0 as usize].prefixable = false;
    }

    fn thermal(&mut self, id: UnitId, thermal: Thermal) {
        let unit = &mut self.units[id.0 as usize];
        unit.thermal = Some(thermal);
        unit.prefixable = false;
        match thermal {
            Thermal::Absolute(scale) => self.temperatures[scale as usize] = id,
            Thermal::Degree(scale) => self.degrees[scale as usize] = id,
        }
    }

    fn register_prefix(&mut self, name: &str, aliases: &[&str], factor: f64, scope: PrefixScope) {
        let id = PrefixId(self.prefixes.len() as u16);
        for alias in aliases {
            self.prefix_aliases.insert(alias.to_string(), id);
        }
        self.prefixes.push(Prefix {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            factor,
            scope,
        });
    }

    fn register_all_prefixes(&mut self) {
        use PrefixScope::{Any, Information};

        self.register_prefix("googol", &["googol"], 1e100, Any);

        // Binary prefixes
        self.register_prefix("kibi", &["Ki", "Kibi", "kibi"], 2f64.powi(10), Information);
        self.register_prefix("mebi", &["Mi", "Mebi", "mebi"], 2f64.powi(20), Information);
        self.register_prefix("gibi", &["Gi", "Gibi", "gibi"], 2f64.powi(30), Information);
        self.register_prefix("tebi", &["Ti", "Tebi", "tebi"], 2f64.powi(40), Information);
        self.register_prefix("pebi", &["Pi", "Pebi", "pebi"], 2f64.powi(50), Information);
        self.register_prefix("exi", &["Ei", "Exi", "exi"], 2f64.powi(60), Information);
        self.register_prefix("zebi", &["Zi", "Zebi", "zebi"], 2f64.powi(70), Information);
        self.register_prefix("yebi", &["Yi", "Yebi", "yebi"], 2f64.powi(80), Information);

        // SI prefixes
        self.register_prefix("yotta", &["Y", "Yotta", "yotta"], 1e24, Any);
        self.register_prefix("zetta", &["Z", "Zetta", "zetta"], 1e21, Any);
        self.register_prefix("exa", &["E", "Exa", "exa"], 1e18, Any);
        self.register_prefix("peta", &["P", "Peta", "peta"], 1e15, Any);
        self.register_prefix("tera", &["T", "Tera", "tera"], 1e12, Any);
        self.register_prefix("giga", &["G", "Giga", "giga"], 1e9, Any);
        self.register_prefix("mega", &["M", "Mega", "mega"], 1e6, Any);
        self.register_prefix("kilo", &["k", "kilo"], 1e3, Any);
        self.register_prefix("hecto", &["h", "Hecto", "hecto"], 1e2, Any);
        self.register_prefix("deca", &["da", "Deca", "deca", "deka"], 1e1, Any);
        self.register_prefix("deci", &["d", "Deci", "deci"], 1e-1, Any);
        self.register_prefix("centi", &["c", "Centi", "centi"], 1e-2, Any);
        self.register_prefix("milli", &["m", "Milli", "milli"], 1e-3, Any);
        self.register_prefix("micro", &["u", "\u{00B5}", "\u{03BC}", "Micro", "mc", "micro"], 1e-6, Any);
        self.register_prefix("nano", &["n", "Nano", "nano"], 1e-9, Any);
        self.register_prefix("pico", &["p", "Pico", "pico"], 1e-12, Any);
        self.register_prefix("femto", &["f", "Femto", "femto"], 1e-15, Any);
        self.register_prefix("atto", &["a", "Atto", "atto"], 1e-18, Any);
        self.register_prefix("zepto", &["z", "Zepto", "zepto"], 1e-21, Any);
        self.register_prefix("yocto", &["y", "Yocto", "yocto"], 1e-24, Any);
    }

    fn register_all_units(&mut self) {
        // The placeholder must be the first definition: Atom::ONE points at it
        let one = self.base("1", &["1"], "unitless", None);
        self.fixed(one);

        self.register_base_units();
        self.register_temperature_units();
        self.register_length_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_time_units();
        self.register_mass_units();
        self.register_speed_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_viscosity_units();
        self.register_substance_units();
        self.register_electrical_units();
        self.register_radiation_units();
        self.register_frequency_units();
        self.register_angle_units();
        self.register_information_units();
        self.register_luminosity_units();
        self.register_counting_units();
    }

    fn register_base_units(&mut self) {
        self.base("meter", &["m", "meter", "meters", "metre", "metres"], "length", Some(dimension::LENGTH));
        self.base("kilogram", &["kg", "kilogram", "kilograms"], "mass", Some(dimension::MASS));
        self.base("second", &["s", "sec", "secs", "second", "seconds"], "time", Some(dimension::TIME));
        self.base("ampere", &["A", "Ampere", "ampere", "amp", "amps"], "current", Some(dimension::CURRENT));
        self.base("mole", &["mol", "mole"], "substance", Some(dimension::SUBSTANCE));
        self.base("candela", &["cd", "candela"], "luminosity", Some(dimension::LUMINOSITY));
        self.base("dollar", &["USD", "dollar"], "currency", Some(dimension::CURRENCY));
        self.base("byte", &["B", "byte", "bytes"], "information", Some(dimension::INFORMATION));
        self.base("radian", &["rad", "radian", "radians"], "angle", Some(dimension::ANGLE));

        // Dimensionless base units
        self.base("steradian", &["sr", "steradian", "steradians"], "solid_angle", None);
        self.base("each", &["each"], "counting", None);
        self.base("decibel", &["dB", "decibel", "decibels"], "logarithmic", None);
    }

    fn register_temperature_units(&mut self) {
        let kelvin = self.base("kelvin", &["degK", "kelvin"], "temperature", Some(dimension::TEMPERATURE));
        self.thermal(kelvin, Thermal::Degree(Scale::Kelvin));
        let id = self.derived("celsius", &["degC", "celsius", "centigrade"], "temperature", 1.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Degree(Scale::Celsius));
        let id = self.derived("fahrenheit", &["degF", "fahrenheit"], "temperature", 5.0 / 9.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Degree(Scale::Fahrenheit));
        let id = self.derived("rankine", &["degR", "rankine"], "temperature", 5.0 / 9.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Degree(Scale::Rankine));

        let temp_k = self.base("temp-K", &["tempK", "temp-K"], "temperature", Some(dimension::TEMPERATURE));
        self.thermal(temp_k, Thermal::Absolute(Scale::Kelvin));
        let id = self.derived("temp-C", &["tempC", "temp-C"], "temperature", 1.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Absolute(Scale::Celsius));
        let id = self.derived("temp-F", &["tempF", "temp-F"], "temperature", 5.0 / 9.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Absolute(Scale::Fahrenheit));
        let id = self.derived("temp-R", &["tempR", "temp-R"], "temperature", 5.0 / 9.0, &["kelvin"], &[]);
        self.thermal(id, Thermal::Absolute(Scale::Rankine));
    }

    fn register_length_units(&mut self) {
        let m = &["meter"];
        self.derived("inch", &["in", "inch", "inches"], "length", 0.0254, m, &[]);
        self.derived("foot", &["ft", "foot", "feet"], "length", 0.3048, m, &[]);
        self.derived("yard", &["yd", "yard", "yards"], "length", 0.9144, m, &[]);
        self.derived("mile", &["mi", "mile", "miles"], "length", 1609.344, m, &[]);
        self.derived("naut-mile", &["nmi", "naut-mile"], "length", 1852.0, m, &[]);
        self.derived("league", &["league", "leagues"], "length", 4828.0, m, &[]);
        self.derived("furlong", &["furlong", "furlongs"], "length", 201.2, m, &[]);
        self.derived("rod", &["rd", "rod", "rods"], "length", 5.029, m, &[]);
        self.derived("mil", &["mil", "mils"], "length", 0.0000254, m, &[]);
        self.derived("angstrom", &["ang", "angstrom", "angstroms"], "length", 1e-10, m, &[]);
        self.derived("fathom", &["fathom", "fathoms"], "length", 1.829, m, &[]);
        self.derived("pica", &["pica", "picas"], "length", 0.00423333333, m, &[]);
        self.derived("point", &["pnt", "point", "points"], "length", 0.000352777778, m, &[]);
        self.derived("redshift", &["z", "red-shift", "redshift"], "length", 1.302773e26, m, &[]);
        self.derived("AU", &["AU", "astronomical-unit"], "length", 149597900000.0, m, &[]);
        self.derived("light-second", &["ls", "light-second"], "length", 299792500.0, m, &[]);
        self.derived("light-minute", &["lmin", "light-minute"], "length", 17987550000.0, m, &[]);
        self.derived("light-year", &["ly", "light-year"], "length", 9460528000000000.0, m, &[]);
        self.derived("parsec", &["pc", "parsec", "parsecs"], "length", 30856780000000000.0, m, &[]);
        self.derived("datamile", &["DM", "datamile"], "length", 1828.8, m, &[]);
    }

    fn register_area_units(&mut self) {
        let m2 = &["meter", "meter"];
        self.derived("hectare", &["hectare"], "area", 10000.0, m2, &[]);
        self.derived("acre", &["acre", "acres"], "area", 4046.85642, m2, &[]);
        self.derived("sqft", &["sqft"], "area", 0.09290304, m2, &[]);
    }

    fn register_volume_units(&mut self) {
        let m3 = &["meter", "meter", "meter"];
        self.derived("liter", &["l", "L", "liter", "liters", "litre", "litres"], "volume", 0.001, m3, &[]);
        self.derived("gallon", &["gal", "gallon", "gallons"], "volume", 0.0037854118, m3, &[]);
        self.derived("gallon-imp", &["galimp", "gallon-imp", "gallons-imp"], "volume", 0.00454609, m3, &[]);
        self.derived("quart", &["qt", "quart", "quarts"], "volume", 0.00094635295, m3, &[]);
        self.derived("pint", &["pt", "pint", "pints"], "volume", 0.000473176475, m3, &[]);
        self.derived("pint-imp", &["ptimp", "pint-imp", "pints-imp"], "volume", 5.6826125e-4, m3, &[]);
        self.derived("cup", &["cu", "cup", "cups"], "volume", 0.000236588238, m3, &[]);
        self.derived("fluid-ounce", &["floz", "fluid-ounce", "fluid-ounces"], "volume", 2.95735297e-5, m3, &[]);
        self.derived("fluid-ounce-imp", &["flozimp", "floz-imp", "fluid-ounce-imp"], "volume", 2.84130625e-5, m3, &[]);
        self.derived("tablespoon", &["tb", "tbsp", "tbs", "tablespoon", "tablespoons"], "volume", 1.47867648e-5, m3, &[]);
        self.derived("teaspoon", &["tsp", "teaspoon", "teaspoons"], "volume", 4.92892161e-6, m3, &[]);
        self.derived("bushel", &["bu", "bsh", "bushel", "bushels"], "volume", 0.035239072, m3, &[]);
        self.derived("oilbarrel", &["bbl", "oilbarrel", "oil-barrel", "oil-barrels"], "volume", 0.158987294928, m3, &[]);
        self.derived("beerbarrel", &["bl", "bl-us", "beerbarrel", "beer-barrel"], "volume", 0.1173477658, m3, &[]);
        self.derived("beerbarrel-imp", &["blimp", "bl-imp", "beerbarrel-imp"], "volume", 0.16365924, m3, &[]);
    }

    fn register_time_units(&mut self) {
        let s = &["second"];
        self.derived("minute", &["min", "mins", "minute", "minutes"], "time", 60.0, s, &[]);
        self.derived("hour", &["h", "hr", "hrs", "hour", "hours"], "time", 3600.0, s, &[]);
        self.derived("day", &["d", "day", "days"], "time", 86400.0, s, &[]);
        self.derived("week", &["wk", "week", "weeks"], "time", 604800.0, s, &[]);
        self.derived("fortnight", &["fortnight", "fortnights"], "time", 1209600.0, s, &[]);
        self.derived("year", &["y", "yr", "year", "years", "annum"], "time", 31556926.0, s, &[]);
        self.derived("decade", &["decade", "decades"], "time", 315569260.0, s, &[]);
        self.derived("century", &["century", "centuries"], "time", 3155692600.0, s, &[]);
    }

    fn register_mass_units(&mut self) {
        let kg = &["kilogram"];
        self.derived("AMU", &["u", "AMU", "amu"], "mass", 1.660538921e-27, kg, &[]);
        self.derived("dalton", &["Da", "Dalton", "Daltons", "dalton", "daltons"], "mass", 1.660538921e-27, kg, &[]);
        self.derived("slug", &["slug", "slugs"], "mass", 14.5939029, kg, &[]);
        self.derived("short-ton", &["tn", "ton", "short-ton"], "mass", 907.18474, kg, &[]);
        self.derived("metric-ton", &["t", "tonne", "metric-ton"], "mass", 1000.0, kg, &[]);
        self.derived("carat", &["ct", "carat", "carats"], "mass", 0.0002, kg, &[]);
        self.derived("pound", &["lbs", "lb", "pound", "pounds", "#"], "mass", 0.45359237, kg, &[]);
        self.derived("ounce", &["oz", "ounce", "ounces"], "mass", 0.0283495231, kg, &[]);
        self.derived("gram", &["g", "gram", "grams", "gramme", "grammes"], "mass", 1e-3, kg, &[]);
        self.derived("grain", &["grain", "grains", "gr"], "mass", 6.479891e-5, kg, &[]);
        self.derived("dram", &["dram", "drams", "dr"], "mass", 0.0017718452, kg, &[]);
        self.derived("stone", &["stone", "stones", "st"], "mass", 6.35029318, kg, &[]);
    }

    fn register_speed_units(&mut self) {
        let (m, s, s2) = (&["meter"], &["second"], &["second", "second"]);
        self.derived("kph", &["kph"], "speed", 0.277777778, m, s);
        self.derived("mph", &["mph"], "speed", 0.44704, m, s);
        self.derived("knot", &["kt", "kn", "kts", "knot", "knots"], "speed", 0.514444444, m, s);
        self.derived("fps", &["fps"], "speed", 0.3048, m, s);

        self.derived("gee", &["gee"], "acceleration", 9.80665, m, s2);
        self.derived("Gal", &["Gal"], "acceleration", 1e-2, m, s2);
    }

    fn register_force_units(&mut self) {
        let (num, den) = (&["kilogram", "meter"], &["second", "second"]);
        self.derived("newton", &["N", "Newton", "newton"], "force", 1.0, num, den);
        self.derived("dyne", &["dyn", "dyne"], "force", 1e-5, num, den);
        self.derived("pound-force", &["lbf", "pound-force"], "force", 4.448222, num, den);
    }

    fn register_energy_units(&mut self) {
        let (num, den) = (&["meter", "meter", "kilogram"], &["second", "second"]);
        self.derived("joule", &["J", "joule", "Joule", "joules", "Joules"], "energy", 1.0, num, den);
        self.derived("erg", &["erg", "ergs"], "energy", 1e-7, num, den);
        self.derived("btu", &["BTU", "btu", "BTUs"], "energy", 1055.056, num, den);
        self.derived("calorie", &["cal", "calorie", "calories"], "energy", 4.184, num, den);
        self.derived("Calorie", &["Cal", "Calorie", "Calories"], "energy", 4184.0, num, den);
        self.derived("therm-US", &["th", "therm", "therms", "Therm", "therm-US"], "energy", 105480400.0, num, den);
        self.derived("Wh", &["Wh"], "energy", 3600.0, num, den);
        self.derived("electronvolt", &["eV", "electronvolt", "electronvolts"], "energy", 1.602176634e-19, num, den);
    }

    fn register_power_units(&mut self) {
        let (num, den) = (&["kilogram", "meter", "meter"], &["second", "second", "second"]);
        self.derived("watt", &["W", "watt", "watts"], "power", 1.0, num, den);
        self.derived("volt-ampere", &["VA", "volt-ampere"], "power", 1.0, num, den);
        self.derived("volt-ampere-reactive", &["var", "Var", "VAr", "VAR", "volt-ampere-reactive"], "power", 1.0, num, den);
        self.derived("horsepower", &["hp", "horsepower"], "power", 745.699872, num, den);
    }

    fn register_pressure_units(&mut self) {
        let (num, den) = (&["kilogram"], &["meter", "second", "second"]);
        self.derived("pascal", &["Pa", "pascal", "Pascal"], "pressure", 1.0, num, den);
        self.derived("bar", &["bar", "bars"], "pressure", 100000.0, num, den);
        self.derived("mmHg", &["mmHg"], "pressure", 133.322368, num, den);
        self.derived("inHg", &["inHg"], "pressure", 3386.3881472, num, den);
        self.derived("torr", &["torr"], "pressure", 133.322368, num, den);
        self.derived("atm", &["atm", "ATM", "atmosphere", "atmospheres"], "pressure", 101325.0, num, den);
        self.derived("psi", &["psi"], "pressure", 6894.76, num, den);
        self.derived("cmh2o", &["cmH2O", "cmh2o"], "pressure", 98.0638, num, den);
        self.derived("inh2o", &["inH2O", "inh2o"], "pressure", 249.082052, num, den);
    }

    fn register_viscosity_units(&mut self) {
        self.derived("poise", &["P", "poise"], "viscosity", 0.1, &["kilogram"], &["meter", "second"]);
        self.derived("stokes", &["St", "stokes"], "viscosity", 1e-4, &["meter", "meter"], &["second"]);
    }

    fn register_substance_units(&mut self) {
        let m3 = &["meter", "meter", "meter"];
        self.derived("molar", &["M", "molar"], "molar_concentration", 1000.0, &["mole"], m3);
        self.derived("wtpercent", &["wt%", "wtpercent"], "density", 10.0, &["kilogram"], m3);
        self.derived("katal", &["kat", "katal", "Katal"], "activity", 1.0, &["mole"], &["second"]);
        self.derived("unit", &["U", "enzUnit", "unit"], "activity", 16.667e-15, &["mole"], &["second"]);
    }

    fn register_electrical_units(&mut self) {
        let m2kg = &["meter", "meter", "kilogram"];
        self.derived("coulomb", &["C", "coulomb", "Coulomb"], "charge", 1.0, &["ampere", "second"], &[]);
        self.derived("Ah", &["Ah"], "charge", 3600.0, &["ampere", "second"], &[]);
        self.derived("volt", &["V", "Volt", "volt", "volts"], "potential", 1.0, m2kg, &["second", "second", "second", "ampere"]);
        self.derived("ohm", &["Ohm", "ohm", "\u{03A9}", "ohms"], "resistance", 1.0, m2kg, &["second", "second", "second", "ampere", "ampere"]);
        self.derived("siemens", &["S", "Siemens", "siemens"], "conductance", 1.0, &["second", "second", "second", "ampere", "ampere"], m2kg);
        self.derived("farad", &["F", "farad", "Farad"], "capacitance", 1.0, &["second", "second", "second", "second", "ampere", "ampere"], m2kg);
        self.derived("henry", &["H", "Henry", "henry"], "inductance", 1.0, m2kg, &["second", "second", "ampere", "ampere"]);
        self.derived("weber", &["Wb", "weber", "webers"], "magnetism", 1.0, m2kg, &["second", "second", "ampere"]);
        self.derived("tesla", &["T", "tesla", "teslas"], "magnetism", 1.0, &["kilogram"], &["second", "second", "ampere"]);
        self.derived("gauss", &["G", "gauss"], "magnetism", 1e-4, &["kilogram"], &["second", "second", "ampere"]);
        self.derived("maxwell", &["Mx", "maxwell", "maxwells"], "magnetism", 1e-8, m2kg, &["second", "second", "ampere"]);
        self.derived("oersted", &["Oe", "oersted", "oersteds"], "magnetism", 250.0 / PI, &["ampere"], &["meter"]);
    }

    fn register_radiation_units(&mut self) {
        let (m2, s2) = (&["meter", "meter"], &["second", "second"]);
        self.derived("gray", &["Gy", "gray", "grays"], "radiation", 1.0, m2, s2);
        self.derived("roentgen", &["R", "roentgen"], "radiation_exposure", 0.00933, &["ampere", "second"], &["kilogram"]);
        self.derived("sievert", &["Sv", "sievert", "sieverts"], "radiation", 1.0, m2, s2);
        self.derived("becquerel", &["Bq", "becquerel", "becquerels"], "radiation", 1.0, &[], &["second"]);
        self.derived("curie", &["Ci", "curie", "curies"], "radiation", 3.7e10, &[], &["second"]);
    }

    fn register_frequency_units(&mut self) {
        self.derived("hertz", &["Hz", "hertz", "Hertz"], "frequency", 1.0, &[], &["second"]);
        self.derived("rpm", &["rpm"], "angular_velocity", 2.0 * PI / 60.0, &["radian"], &["second"]);
    }

    fn register_angle_units(&mut self) {
        let rad = &["radian"];
        self.derived("degree", &["deg", "degree", "degrees"], "angle", PI / 180.0, rad, &[]);
        self.derived("arcminute", &["arcmin", "arcminute", "arcminutes"], "angle", PI / 10800.0, rad, &[]);
        self.derived("arcsecond", &["arcsec", "arcsecond", "arcseconds"], "angle", PI / 648000.0, rad, &[]);
        self.derived("gradian", &["gon", "grad", "gradian", "grads"], "angle", PI / 200.0, rad, &[]);
        self.derived("rotation", &["rotation"], "angle", 2.0 * PI, rad, &[]);
    }

    fn register_information_units(&mut self) {
        self.derived("bit", &["b", "bit", "bits"], "information", 0.125, &["byte"], &[]);
        self.derived("Bps", &["Bps"], "information_rate", 1.0, &["byte"], &["second"]);
        self.derived("bps", &["bps"], "information_rate", 0.125, &["byte"], &["second"]);
        self.derived("cents", &["cents"], "currency", 0.01, &["dollar"], &[]);
    }

    fn register_luminosity_units(&mut self) {
        let num = &["candela", "steradian"];
        self.derived("lumen", &["lm", "lumen"], "luminous_power", 1.0, num, &[]);
        self.derived("lux", &["lux"], "illuminance", 1.0, num, &["meter", "meter"]);
    }

    fn register_counting_units(&mut self) {
        let fixed = [
            self.derived("dozen", &["doz", "dz", "dozen"], "counting", 12.0, &["each"], &[]),
            self.derived("gross", &["gross"], "counting", 144.0, &["each"], &[]),
            self.derived("cell", &["cells", "cell"], "counting", 1.0, &["each"], &[]),
            self.derived("percent", &["%", "percent"], "unitless", 0.01, &[], &[]),
            self.derived("ppm", &["ppm"], "unitless", 1e-6, &[], &[]),
            self.derived("ppb", &["ppb"], "unitless", 1e-9, &[], &[]),
            self.derived("ppt", &["ppt"], "unitless", 1e-12, &[], &[]),
            self.derived("cpm", &["cpm"], "rate", 1.0 / 60.0, &["each"], &["second"]),
            self.derived("dpm", &["dpm"], "rate", 1.0 / 60.0, &["each"], &["second"]),
            self.derived("bpm", &["bpm"], "rate", 1.0 / 60.0, &["each"], &["second"]),
        ];
        for id in fixed {
            self.fixed(id);
        }
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_registry() {
        let reg = UnitRegistry::new();

        // Test basic lookup
        assert!(reg.get("m").is_some());
        assert!(reg.get("kg").is_some());
        assert!(reg.get("s").is_some());

        // Test alias lookup
        assert!(reg.get("meter").is_some());
        assert!(reg.get("meters").is_some());
        assert!(reg.get("kilogram").is_some());

        // Test unknown unit
        assert!(reg.get("unknown_xyz").is_none());
    }

    #[test]
    fn test_placeholder_is_first() {
        let reg = UnitRegistry::new();
        assert_eq!(reg.lookup("1"), Some(Atom::ONE.unit_id()));
        assert_eq!(reg.unit(Atom::ONE.unit_id()).name, "1");
    }

    #[test]
    fn test_aliases_are_unique() {
        let reg = UnitRegistry::new();
        for unit in reg.units.iter() {
            for alias in &unit.aliases {
                assert_eq!(
                    reg.get(alias).map(|u| u.name.as_str()),
                    Some(unit.name.as_str()),
                    "alias {} is shadowed",
                    alias
                );
            }
        }
    }

    #[test]
    fn test_breakdowns_resolve() {
        let reg = UnitRegistry::new();
        let newton = reg.get("N").unwrap();
        assert_eq!(newton.numerator.len(), 2);
        assert_eq!(newton.denominator.len(), 2);
        assert_eq!(reg.kind_of(&newton.dimension), "force");

        let ohm = reg.get("ohm").unwrap();
        assert_eq!(reg.kind_of(&ohm.dimension), "resistance");
        assert_eq!(reg.kind_of(&reg.get("S").unwrap().dimension), "conductance");
        assert_eq!(reg.kind_of(&reg.get("l").unwrap().dimension), "volume");
    }

    #[test]
    fn test_prefix_resolution() {
        let reg = UnitRegistry::new();

        let (prefix, unit) = reg.resolve_prefixed("cm").unwrap();
        assert_eq!(prefix.unwrap().name, "centi");
        assert_eq!(unit.name, "meter");

        // exact aliases win over prefix peeling
        let (prefix, unit) = reg.resolve_prefixed("min").unwrap();
        assert!(prefix.is_none());
        assert_eq!(unit.name, "minute");

        let (prefix, unit) = reg.resolve_prefixed("mcg").unwrap();
        assert_eq!(prefix.unwrap().name, "micro");
        assert_eq!(unit.name, "gram");

        assert_eq!(reg.resolve("\u{00B5}g"), reg.resolve("ug"));
        assert_eq!(reg.resolve("\u{03BC}g"), reg.resolve("ug"));
        assert_eq!(reg.resolve("dam").unwrap().prefix().unwrap().name, "deca");
        assert!(reg.resolve("mmm").is_none());
        assert!(reg.resolve("p").is_none());

        // a milli-inch must not render as a minute
        let milli_inch = reg.resolve("milliinch").unwrap();
        assert_eq!(milli_inch.unit().name, "inch");
        assert_eq!(milli_inch.symbol(), "minch");
        assert_eq!(reg.resolve("minch"), Some(milli_inch));
        assert_eq!(reg.resolve("centiday").unwrap().symbol(), "cday");
        assert_eq!(reg.resolve("Gyr").unwrap().symbol(), "Gyr");
    }

    #[test]
    fn test_prefix_applicability() {
        let reg = UnitRegistry::new();
        assert!(reg.resolve("KiB").is_some());
        assert!(reg.resolve("Gib").is_some());
        assert!(reg.resolve("Kim").is_none());
        assert!(reg.resolve("ktempC").is_none());
        assert!(reg.resolve("mdegC").is_none());
        assert!(reg.resolve("k%").is_none());
    }

    #[test]
    fn test_thermal_units() {
        let reg = UnitRegistry::new();
        for scale in [Scale::Kelvin, Scale::Celsius, Scale::Fahrenheit, Scale::Rankine] {
            let temp = reg.unit(reg.temperature_unit(scale));
            assert_eq!(temp.symbol(), scale.temperature_units());
            assert_eq!(temp.thermal, Some(Thermal::Absolute(scale)));
            let deg = reg.unit(reg.degree_unit(scale));
            assert_eq!(deg.symbol(), scale.degree_units());
            assert_eq!(deg.thermal, Some(Thermal::Degree(scale)));
        }
    }

    #[test]
    fn test_units_of_kind() {
        let reg = UnitRegistry::new();
        let lengths = reg.units_of_kind("length");
        assert!(lengths.contains(&"m"));
        assert!(lengths.contains(&"ft"));
        assert!(!lengths.contains(&"kg"));
        assert!(reg.units_of_kind("no_such_kind").is_empty());
    }

    #[test]
    fn test_aliases() {
        let reg = UnitRegistry::new();
        let aliases = reg.aliases("m").unwrap();
        assert_eq!(aliases, vec!["m", "meter", "meters", "metre", "metres"]);
        assert!(reg.aliases("kilo").unwrap().contains(&"k"));
        assert!(reg.aliases("nope").is_none());
    }

    #[test]
    fn test_kinds() {
        let reg = UnitRegistry::new();
        let kinds = reg.kinds();
        assert!(kinds.contains(&"length"));
        assert!(kinds.contains(&"conductance"));
        assert!(kinds.contains(&"unitless"));
    }

    #[test]
    fn test_prefixed_symbols_read_back() {
        let mut rendered = 0;
        for (p, prefix) in UNITS.prefixes.iter().enumerate() {
            for (u, unit) in UNITS.units.iter().enumerate().skip(1) {
                if !prefix.applies_to(unit) {
                    continue;
                }
                let atom = Atom::new(Some(PrefixId(p as u16)), UnitId(u as u16));
                if let Some(symbol) = UNITS.prefixed_symbol(atom.prefix.unwrap(), atom.unit) {
                    assert_eq!(UNITS.resolve(&symbol), Some(atom), "{}", symbol);
                    assert_eq!(atom.symbol(), symbol);
                    rendered += 1;
                }
                for long in [format!("{}{}", prefix.name, unit.name), format!("{}{}", prefix.symbol(), unit.symbol())] {
                    if let Some(found) = UNITS.resolve(&long) {
                        assert_eq!(UNITS.resolve(&found.symbol()), Some(found), "{}", long);
                    }
                }
            }
        }
        assert!(rendered > 1000);
    }
}
