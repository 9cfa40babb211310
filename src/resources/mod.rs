//! Medical resource directory with simulated live availability.

use rand::Rng;
use serde::{Serialize, Serializer};
use strum::{Display, EnumString};

use Availability::{Count, NotApplicable};
use ResourceKind::{DiagnosticCenter, Hospital, Pharmacy};

/// Kind of medical resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum ResourceKind {
    /// Inpatient hospital.
    Hospital,
    /// Retail pharmacy.
    Pharmacy,
    /// Diagnostic lab.
    #[serde(rename = "Diagnostic Center")]
    #[strum(serialize = "Diagnostic Center")]
    DiagnosticCenter,
}

/// A count, or "N/A" where the figure does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Known figure.
    Count(u32),
    /// Not applicable to this kind of resource.
    NotApplicable,
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Count(n) => serializer.serialize_u32(*n),
            Availability::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// Directory entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalResource {
    /// Stable identifier.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Resource kind.
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Street address or area.
    pub address: &'static str,
    /// Phone number.
    pub contact: &'static str,
    /// Website.
    pub website: &'static str,
    /// Free beds.
    pub beds_available: Availability,
    /// Expected wait.
    pub wait_time_minutes: Availability,
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    id: u32,
    name: &'static str,
    kind: ResourceKind,
    address: &'static str,
    contact: &'static str,
    website: &'static str,
    beds: Availability,
    wait: Availability,
) -> MedicalResource {
    MedicalResource {
        id,
        name,
        kind,
        address,
        contact,
        website,
        beds_available: beds,
        wait_time_minutes: wait,
    }
}

/// Seed directory. Requests work on copies; this is never mutated.
pub const DIRECTORY: &[MedicalResource] = &[
    entry(
        1,
        "Apollo Hospital",
        Hospital,
        "Jubilee Hills, Hyderabad",
        "+91-40-2360 7777",
        "https://www.apollohospitals.com/",
        Count(15),
        Count(30),
    ),
    entry(
        2,
        "Max Healthcare",
        Hospital,
        "Saket, New Delhi",
        "+91-11-2651 5050",
        "https://www.maxhealthcare.in/",
        Count(10),
        Count(45),
    ),
    entry(
        3,
        "Fortis Hospital",
        Hospital,
        "Bannerghatta Road, Bangalore",
        "+91-80-2639 4444",
        "https://www.fortishealthcare.com/",
        Count(20),
        Count(20),
    ),
    entry(
        4,
        "Lilavati Hospital",
        Hospital,
        "Bandra Reclamation, Mumbai",
        "+91-22-2675 1000",
        "https://www.lilavatihospital.com/",
        Count(8),
        Count(50),
    ),
    entry(
        5,
        "AIIMS Delhi",
        Hospital,
        "Ansari Nagar, New Delhi",
        "+91-11-2658 8500",
        "https://www.aiims.edu/",
        Count(25),
        Count(60),
    ),
    entry(
        6,
        "Manipal Hospital",
        Hospital,
        "Old Airport Road, Bangalore",
        "+91-80-2502 4444",
        "https://www.manipalhospitals.com/",
        Count(12),
        Count(35),
    ),
    entry(
        7,
        "MedPlus Pharmacy",
        Pharmacy,
        "Various locations",
        "1800-123-4567",
        "https://www.medplusindia.com/",
        NotApplicable,
        NotApplicable,
    ),
    entry(
        8,
        "Dr. Lal PathLabs",
        DiagnosticCenter,
        "Various locations",
        "+91-11-3988 5050",
        "https://www.lalpathlabs.com/",
        NotApplicable,
        NotApplicable,
    ),
];

impl MedicalResource {
    /// Case-insensitive substring match on name, kind or address.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.kind.to_string().to_lowercase().contains(needle)
            || self.address.to_lowercase().contains(needle)
    }

    /// Replace availability with a simulated live figure.
    fn simulate<R: Rng>(mut self, rng: &mut R) -> Self {
        let (beds, wait) = match self.kind {
            Hospital => (Count(rng.random_range(5..=30)), rng.random_range(15..=120)),
            Pharmacy => (NotApplicable, rng.random_range(5..=15)),
            DiagnosticCenter => (NotApplicable, rng.random_range(10..=45)),
        };
        self.beds_available = beds;
        self.wait_time_minutes = Count(wait);
        self
    }
}

/// Search the directory. An empty query returns everything.
pub fn search<R: Rng>(query: &str, rng: &mut R) -> Vec<MedicalResource> {
    let needle = query.to_lowercase();
    DIRECTORY
        .iter()
        .filter(|r| r.matches(&needle))
        .map(|r| r.clone().simulate(rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count(a: Availability) -> u32 {
        match a {
            Count(n) => n,
            NotApplicable => panic!("expected a count"),
        }
    }

    #[test]
    fn empty_query_returns_all() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(search("", &mut rng).len(), DIRECTORY.len());
    }

    #[test]
    fn filters_by_address_case_insensitively() {
        let mut rng = StdRng::seed_from_u64(3);
        let names: Vec<_> = search("BANGALORE", &mut rng).iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Fortis Hospital", "Manipal Hospital"]);
    }

    #[test]
    fn filters_by_kind() {
        let mut rng = StdRng::seed_from_u64(3);
        let hits = search("diagnostic", &mut rng);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Dr. Lal PathLabs");
    }

    #[test]
    fn simulated_figures_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            for r in search("", &mut rng) {
                let wait = count(r.wait_time_minutes);
                match r.kind {
                    ResourceKind::Hospital => {
                        assert!((5..=30).contains(&count(r.beds_available)));
                        assert!((15..=120).contains(&wait));
                    }
                    ResourceKind::Pharmacy => {
                        assert_eq!(r.beds_available, NotApplicable);
                        assert!((5..=15).contains(&wait));
                    }
                    ResourceKind::DiagnosticCenter => {
                        assert_eq!(r.beds_available, NotApplicable);
                        assert!((10..=45).contains(&wait));
                    }
                }
            }
        }
    }

    #[test]
    fn seed_directory_is_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let _ = search("hospital", &mut rng);
        assert_eq!(DIRECTORY[0].beds_available, Count(15));
    }

    #[test]
    fn serializes_type_and_na() {
        let json = serde_json::to_value(DIRECTORY[7].clone()).unwrap();
        assert_eq!(json["type"], "Diagnostic Center");
        assert_eq!(json["beds_available"], "N/A");
        assert_eq!(json["id"], 8);
    }
}
