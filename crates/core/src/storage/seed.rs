//! Sample dataset used when no usable local data exists

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{
    ArDetails, AsDetails, Contacts, DesignStatus, District, Project, ProjectId,
};

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn contacts(people: [&str; 6]) -> Contacts {
    let [ae_name, ae_phone, aee_name, aee_phone, contractor_name, contractor_phone] = people;
    Contacts {
        ae_name: ae_name.into(),
        ae_phone: ae_phone.into(),
        aee_name: aee_name.into(),
        aee_phone: aee_phone.into(),
        contractor_name: contractor_name.into(),
        contractor_phone: contractor_phone.into(),
    }
}

/// Six sample projects, one per district, each with a different design status
pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::generate(),
            name: "District Hospital Extension".into(),
            district: District::Kozhikode,
            lac: "Kozhikode North (LAC No. 27)".into(),
            as_details: AsDetails {
                status: "Approved".into(),
                number: "AS-2024-001".into(),
                date: day(2024, 1, 15),
            },
            sr_details: "SR issued by Public Works Department on 10th Jan 2024".into(),
            ar_details: ArDetails {
                status: "Approved".into(),
                number: "AR-2024-045".into(),
                date: day(2024, 2, 20),
                revision_details: "R1 - Added emergency wing".into(),
                number_of_floors: "4".into(),
                total_area: "15000 sq.m".into(),
            },
            contacts: contacts([
                "Rajesh Kumar",
                "9876543210",
                "Priya Menon",
                "9876543211",
                "ABC Constructions",
                "9876543212",
            ]),
            design_status: DesignStatus::DetailedOngoing,
            history: Vec::new(),
            created_at: midnight(2024, 1, 10),
            updated_at: midnight(2024, 12, 20),
        },
        Project {
            id: ProjectId::generate(),
            name: "Panchayat Office Building".into(),
            district: District::Kannur,
            lac: "Thalassery (LAC No. 13)".into(),
            as_details: AsDetails {
                status: "Pending".into(),
                number: "AS-2024-002".into(),
                date: day(2024, 3, 10),
            },
            sr_details: "SR pending from local body".into(),
            ar_details: ArDetails {
                status: "Under Review".into(),
                number: "AR-2024-078".into(),
                date: day(2024, 4, 15),
                revision_details: "Original".into(),
                number_of_floors: "2".into(),
                total_area: "800 sq.m".into(),
            },
            contacts: contacts([
                "Suresh Babu",
                "9876543220",
                "Anjali Das",
                "9876543221",
                "Kerala Builders",
                "9876543222",
            ]),
            design_status: DesignStatus::TentativeIssued,
            history: Vec::new(),
            created_at: midnight(2024, 3, 5),
            updated_at: midnight(2024, 12, 25),
        },
        Project {
            id: ProjectId::generate(),
            name: "Community Health Center".into(),
            district: District::Malappuram,
            lac: "Manjeri (LAC No. 37)".into(),
            as_details: AsDetails {
                status: "Approved".into(),
                number: "AS-2024-003".into(),
                date: day(2024, 5, 20),
            },
            sr_details: "SR approved by Health Department".into(),
            ar_details: ArDetails {
                status: "Issued".into(),
                number: "AR-2024-112".into(),
                date: day(2024, 6, 10),
                revision_details: "R2 - Modified layout".into(),
                number_of_floors: "3".into(),
                total_area: "5000 sq.m".into(),
            },
            contacts: contacts([
                "Mohammed Ali",
                "9876543230",
                "Fathima Beevi",
                "9876543231",
                "Modern Constructions",
                "9876543232",
            ]),
            design_status: DesignStatus::DetailedIssued,
            history: Vec::new(),
            created_at: midnight(2024, 5, 15),
            updated_at: midnight(2024, 12, 28),
        },
        Project {
            id: ProjectId::generate(),
            name: "Anganwadi Center".into(),
            district: District::Wayanad,
            lac: "Kalpetta (LAC No. 19)".into(),
            as_details: AsDetails {
                status: "Not Started".into(),
                number: String::new(),
                date: None,
            },
            sr_details: "Awaiting SR from Women and Child Development Department".into(),
            ar_details: ArDetails {
                status: "Not Started".into(),
                number: String::new(),
                date: None,
                revision_details: String::new(),
                number_of_floors: "1".into(),
                total_area: "200 sq.m".into(),
            },
            contacts: contacts([
                "Thomas George",
                "9876543240",
                "Mary Joseph",
                "9876543241",
                "",
                "",
            ]),
            design_status: DesignStatus::FileNotOpened,
            history: Vec::new(),
            created_at: midnight(2024, 7, 1),
            updated_at: midnight(2024, 12, 15),
        },
        Project {
            id: ProjectId::generate(),
            name: "Police Station Renovation".into(),
            district: District::Palakkad,
            lac: "Palakkad (LAC No. 56)".into(),
            as_details: AsDetails {
                status: "On Hold".into(),
                number: "AS-2024-004".into(),
                date: day(2024, 8, 5),
            },
            sr_details: "SR on hold due to budget constraints".into(),
            ar_details: ArDetails {
                status: "On Hold".into(),
                number: "AR-2024-145".into(),
                date: day(2024, 9, 12),
                revision_details: "Original".into(),
                number_of_floors: "2".into(),
                total_area: "1200 sq.m".into(),
            },
            contacts: contacts([
                "Vinod Kumar",
                "9876543250",
                "Lakshmi Nair",
                "9876543251",
                "Supreme Builders",
                "9876543252",
            ]),
            design_status: DesignStatus::DetailedOnHold,
            history: Vec::new(),
            created_at: midnight(2024, 8, 1),
            updated_at: midnight(2024, 12, 10),
        },
        Project {
            id: ProjectId::generate(),
            name: "School Building Construction".into(),
            district: District::Kasaragod,
            lac: "Kasaragod (LAC No. 2)".into(),
            as_details: AsDetails {
                status: "Approved".into(),
                number: "AS-2024-005".into(),
                date: day(2024, 10, 1),
            },
            sr_details: "SR approved by Education Department".into(),
            ar_details: ArDetails {
                status: "In Progress".into(),
                number: "AR-2024-178".into(),
                date: day(2024, 11, 5),
                revision_details: "Original".into(),
                number_of_floors: "3".into(),
                total_area: "8000 sq.m".into(),
            },
            contacts: contacts([
                "Ashok Pillai",
                "9876543260",
                "Reshma Das",
                "9876543261",
                "Excel Constructions",
                "9876543262",
            ]),
            design_status: DesignStatus::TentativeOngoing,
            history: Vec::new(),
            created_at: midnight(2024, 9, 25),
            updated_at: midnight(2024, 12, 30),
        },
    ]
}
