use facdash::ui::NavigationRegistry;
use insta::{assert_json_snapshot, assert_snapshot};

#[test]
fn snapshot_faculty_registry_listing() {
    assert_snapshot!(NavigationRegistry::faculty().listing(), @r"
    * 1  dashboard      Dashboard
      2  attendance     Attendance
      3  assignments    Assignments    (4)
      4  timetable      Timetable
      5  leave          Leave          (2)
      6  messages       Messages       (3)
      7  grievances     Grievances     (2)
      8  e-office       E-Office
      9  wellness       Wellness
     10  residence      Residence
     11  utilities      Utilities
     12  startups       Startups
     13  clubs          Clubs
     14  social-impact  Social Impact
     15  research       Research
     16  library        Library
     17  events         Events
     18  exams          Exams
     19  payroll        Payroll
     20  settings       Settings
    ");
}

#[test]
fn snapshot_registry_json_head() {
    let registry = NavigationRegistry::faculty();
    let head: Vec<_> = registry.iter().take(3).collect();
    assert_json_snapshot!(head, @r#"
    [
      {
        "key": "dashboard",
        "label": "Dashboard",
        "icon": "home"
      },
      {
        "key": "attendance",
        "label": "Attendance",
        "icon": "clipboard-check"
      },
      {
        "key": "assignments",
        "label": "Assignments",
        "icon": "file-text",
        "badge": 4
      }
    ]
    "#);
}
