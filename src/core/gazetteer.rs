use crate::domain::model::Coordinate;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Canonical place names of the Turkish catalog, with map coordinates.
const TURKISH_PLACES: &[(&str, f64, f64)] = &[
    ("İstanbul", 41.0082, 28.9784),
    ("İstanbul Boğazı", 41.1000, 29.0500),
    ("Büyükada", 40.8741, 29.1293),
    ("Haliç", 41.0289, 28.9697),
    ("Büyükçekmece Körfezi", 40.9922, 28.5671),
    ("Marmara Denizi", 40.7500, 28.2500),
    ("Marmara", 40.7000, 28.2000),
    ("Çanakkale", 40.153, 26.405),
    ("Çanakkale Boğazı", 40.2000, 26.4000),
    ("Abide", 40.0503, 26.2192),
    ("Kilitbahir", 40.1472, 26.3797),
    ("Eceabat", 40.1850, 26.3575),
    ("Gelibolu", 40.4100, 26.6700),
    ("Lapseki", 40.3444, 26.6853),
    ("Yapıldak", 40.2078, 26.5492),
    ("Kepez", 40.1000, 26.4000),
    ("Şevketiye", 40.3955, 26.8716),
    ("Burhanlı Mevkii", 40.3069, 26.5593),
    ("Ayazma Mevkii", 39.8120, 26.0090),
    ("Alaybey Mevkii", 39.8280, 26.0150),
    ("Seyit Onbaşı Anıtı Mevkii", 40.1457, 26.3779),
    ("Havuzlar Mevkii", 40.1460, 26.3780),
    ("Gökçeada", 40.1889, 25.9044),
    ("Bozcaada", 39.8322, 26.0719),
    ("Balıkesir", 39.6484, 27.8826),
    ("Bandırma", 40.3533, 27.9708),
    ("Bandırma Körfezi", 40.3800, 27.9500),
    ("Edremit Körfezi", 39.5333, 26.8500),
    ("Ayvalık", 39.3190, 26.6960),
    ("Bursa", 40.1885, 29.0610),
    ("Yalova", 40.6549, 29.2842),
    ("Hersek Lagünü", 40.7239, 29.5046),
    ("Kocaeli", 40.8533, 29.8815),
    ("İzmit", 40.7654, 29.9408),
    ("İzmit Körfezi", 40.7300, 29.7000),
    ("Sakarya", 40.7569, 30.3783),
    ("Tekirdağ", 40.9780, 27.5110),
    ("Uçmakdere", 40.8025, 27.3653),
    ("Edirne", 41.6772, 26.5557),
    ("Kırklareli", 41.7355, 27.2244),
    ("Bilecik", 40.1419, 29.9793),
    ("İzmir", 38.4237, 27.1428),
    ("İzmir Körfezi", 38.4500, 26.9000),
    ("Alsancak Limanı", 38.4410, 27.1480),
    ("Levent Marina", 38.4090, 27.0850),
    ("Pasaport Marina", 38.4289, 27.1325),
    ("Aliağa", 38.7994, 26.9723),
    ("Karaburun", 38.6394, 26.5125),
    ("Karaburun Yarımadası", 38.6394, 26.5125),
    ("Ildır", 38.3842, 26.4764),
    ("Çeşme", 38.3232, 26.3039),
    ("Çeşme-Dalyan Marina", 38.3560, 26.3130),
    ("Seferihisar", 38.2047, 26.8378),
    ("Seferihisar-Sığacık Limanı", 38.1950, 26.7860),
    ("Sığacık", 38.2000, 26.7800),
    ("Urla", 38.3229, 26.7635),
    ("Urla-İskele", 38.3600, 26.7650),
    ("Mordoğan Balıkçı Barınağı", 38.5180, 26.6300),
    ("Özdere-Menderes", 38.0160, 27.0830),
    ("Güzelbahçe", 38.3350, 26.8910),
    ("Dikili", 39.0717, 26.8872),
    ("Dikili Açıkları", 39.0700, 26.8500),
    ("Foça", 38.6669, 26.7550),
    ("Muğla", 37.2154, 28.3636),
    ("Gökova Körfezi", 36.9500, 28.1000),
    ("Akyaka", 37.0536, 28.3264),
    ("Marmaris", 36.8550, 28.2742),
    ("Marmaris Körfezi", 36.8000, 28.3000),
    ("Bodrum", 37.0344, 27.4305),
    ("Salih Adası", 37.1530, 27.5140),
    ("Salih Adası-Bodrum", 37.1530, 27.5140),
    ("Güllük Körfezi", 37.2400, 27.6000),
    ("Fethiye", 36.6217, 29.1164),
    ("Fethiye Körfezi", 36.6500, 29.0500),
    ("Göcek", 36.7550, 28.9380),
    ("Göcek-Fethiye Körfezi", 36.7550, 28.9380),
    ("Sarsala", 36.6614, 28.8579),
    ("İnlice", 36.7160, 29.0500),
    ("Ekincik Körfezi", 36.8250, 28.5500),
    ("Dalyan", 36.8350, 28.6430),
    ("İztuzu", 36.7900, 28.6100),
    ("İztuzu-Dalyan", 36.7900, 28.6100),
    ("Datça Yarımadası", 36.7300, 27.6800),
    ("Kuşadası", 37.8579, 27.2610),
    ("Kuşadası Körfezi", 37.9000, 27.2000),
    ("Aydın", 37.8444, 27.8458),
    ("Manisa", 38.6191, 27.4289),
    ("Denizli", 37.7765, 29.0864),
    ("Uşak", 38.6823, 29.4082),
    ("Kütahya", 39.4167, 29.9833),
    ("Afyon", 38.7569, 30.5386),
    ("Afyonkarahisar", 38.7569, 30.5386),
    ("Antalya", 36.8969, 30.7133),
    ("Antalya Körfezi", 36.7500, 30.8000),
    ("Belek", 36.8622, 31.0556),
    ("Kemer", 36.5969, 30.5597),
    ("Kaş", 36.2000, 29.6333),
    ("Kaş Yarımadası", 36.1800, 29.6200),
    ("Kalkan", 36.2650, 29.4130),
    ("Finike", 36.2944, 30.1464),
    ("Finike Körfezi", 36.2500, 30.2000),
    ("Alanya", 36.5437, 31.9998),
    ("Okurcalar", 36.6490, 31.7040),
    ("Üç Adalar", 36.4550, 30.5480),
    ("Mersin", 36.8121, 34.6415),
    ("Mersin Körfezi", 36.7500, 34.7000),
    ("Anamur", 36.0750, 32.8358),
    ("Silifke", 36.3778, 33.9278),
    ("Paradeniz", 36.2940, 33.9980),
    ("Aydıncık", 36.1450, 33.3250),
    ("Taşucu", 36.3200, 33.8800),
    ("Adana", 37.0000, 35.3213),
    ("Seyhan", 36.9950, 35.3200),
    ("Karataş", 36.5700, 35.3800),
    ("Yumurtalık", 36.7720, 35.7930),
    ("Yumurtalık-Adana", 36.7720, 35.7930),
    ("Ceyhan-Adana", 37.0200, 35.8100),
    ("Hatay", 36.2023, 36.1606),
    ("İskenderun", 36.5867, 36.1642),
    ("İskenderun Körfezi", 36.6660, 35.9550),
    ("Antakya Körfezi", 36.0500, 35.9000),
    ("Arsuz", 36.4100, 35.8800),
    ("Samandağ", 36.0833, 35.9667),
    ("Meydan Köy", 36.0300, 35.9500),
    ("Yayladağı", 35.9031, 36.0603),
    ("Isparta", 37.7648, 30.5567),
    ("Burdur", 37.7203, 30.2908),
    ("Kahramanmaraş", 37.5753, 36.9228),
    ("K.Maraş", 37.5753, 36.9228),
    ("Osmaniye", 37.0742, 36.2467),
    ("Karadeniz", 42.0, 32.0),
    ("Trabzon", 41.0027, 39.7168),
    ("Rize", 41.0201, 40.5234),
    ("Artvin", 41.1828, 41.8183),
    ("Giresun", 40.9128, 38.3895),
    ("Ordu", 40.9839, 37.8764),
    ("Fatsa", 41.0300, 37.5000),
    ("Samsun", 41.2867, 36.3300),
    ("Sinop", 42.0231, 35.1531),
    ("Sinop Körfezi", 42.0100, 35.1500),
    ("Zonguldak", 41.4564, 31.7936),
    ("Ereğli", 41.2800, 31.4300),
    ("Bartın", 41.6344, 32.3375),
    ("Kastamonu", 41.3887, 33.7827),
    ("Bolu", 40.7350, 31.6061),
    ("Düzce", 40.8438, 31.1565),
    ("Akçakoca", 41.0870, 31.1240),
    ("Karabük", 41.2061, 32.6204),
    ("Gümüşhane", 40.4600, 39.4700),
    ("Bayburt", 40.2552, 40.2249),
    ("Çorum", 40.5506, 34.9556),
    ("Amasya", 40.6500, 35.8300),
    ("Tokat", 40.3167, 36.5500),
    ("Ankara", 39.9334, 32.8597),
    ("Eskişehir", 39.7667, 30.5256),
    ("Konya", 37.8667, 32.4800),
    ("Karaman", 37.1759, 33.2287),
    ("Kayseri", 38.7312, 35.4787),
    ("Sivas", 39.7477, 37.0163),
    ("Aksaray", 38.3687, 34.0370),
    ("Niğde", 37.9667, 34.6857),
    ("Nevşehir", 38.6244, 34.7144),
    ("Kırşehir", 39.1425, 34.1709),
    ("Yozgat", 39.8181, 34.8147),
    ("Çankırı", 40.6013, 33.6134),
    ("Kırıkkale", 39.8468, 33.5153),
    ("Erzurum", 39.9043, 41.2691),
    ("Van", 38.4891, 43.4089),
    ("Elazığ", 38.6810, 39.2264),
    ("Erzincan", 39.7500, 39.5000),
    ("Malatya", 38.3552, 38.3095),
    ("Diyarbakır", 37.9144, 40.2306),
    ("Şanlıurfa", 37.1591, 38.7969),
    ("Gaziantep", 37.0662, 37.3833),
    ("Iğdır", 39.9237, 44.0450),
    ("Kars", 40.6013, 43.0975),
    ("Ardahan", 41.1105, 42.7022),
    ("Ağrı", 39.7191, 43.0503),
    ("Muş", 38.7432, 41.4910),
    ("Bitlis", 38.4006, 42.1095),
    ("Bingöl", 38.8847, 40.4939),
    ("Tunceli", 39.1083, 39.5471),
    ("Siirt", 37.9333, 41.9500),
    ("Batman", 37.8812, 41.1351),
    ("Mardin", 37.3212, 40.7245),
    ("Şırnak", 37.5164, 42.4611),
    ("Hakkari", 37.5744, 43.7408),
    ("Adıyaman", 37.7641, 38.2762),
    ("Kilis", 36.7184, 37.1212),
];

static BUILTIN: LazyLock<Arc<Gazetteer>> =
    LazyLock::new(|| Arc::new(Gazetteer::from_entries(TURKISH_PLACES.iter().copied())));

/// Read-only place name → coordinate table. Keys match exactly: case and
/// diacritics are significant.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: HashMap<String, Coordinate>,
}

impl Gazetteer {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, lat, lon)| (name.into(), Coordinate::new(lat, lon)))
            .collect();
        Self { entries }
    }

    /// The built-in table, shared by every resolver in the process.
    pub fn builtin() -> Arc<Gazetteer> {
        Arc::clone(&BUILTIN)
    }

    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_loaded_once() {
        let a = Gazetteer::builtin();
        let b = Gazetteer::builtin();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), TURKISH_PLACES.len());
        assert_eq!(a.get("İzmir"), Some(Coordinate::new(38.4237, 27.1428)));
    }

    #[test]
    fn test_lookup_is_case_and_diacritic_sensitive() {
        let gazetteer = Gazetteer::builtin();
        assert!(gazetteer.contains("Çanakkale"));
        assert!(!gazetteer.contains("Canakkale"));
        assert!(!gazetteer.contains("izmir"));
    }

    #[test]
    fn test_builtin_table_covers_qualified_keys() {
        let gazetteer = Gazetteer::builtin();
        assert_eq!(gazetteer.len(), 189);
        assert_eq!(
            gazetteer.get("Çeşme-Dalyan Marina"),
            Some(Coordinate::new(38.3560, 26.3130))
        );
        assert_eq!(
            gazetteer.get("Salih Adası-Bodrum"),
            Some(Coordinate::new(37.1530, 27.5140))
        );
        for name in ["Foça", "Mardin", "Kepez", "Güzelbahçe"] {
            assert!(gazetteer.contains(name), "missing {}", name);
        }
    }
}
