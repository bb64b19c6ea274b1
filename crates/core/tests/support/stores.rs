//! In-memory implementations of the core store ports.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use academy_core::{ClassCatalogStore, EnrollmentStore, StudentStore};
use academy_domain::{
    AcademyError, ClassCatalog, ClassCatalogEntry, Enrollment, EnrollmentRef,
    Result as DomainResult, StudentRecord, StudentStatus, Subject,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Enrollment store backed by a vector, in insertion order.
#[derive(Default)]
pub struct InMemoryEnrollmentStore {
    enrollments: Mutex<Vec<Enrollment>>,
    failing_writes: Mutex<HashSet<String>>,
    fail_reads: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryEnrollmentStore {
    pub fn new(enrollments: Vec<Enrollment>) -> Self {
        Self { enrollments: Mutex::new(enrollments), ..Self::default() }
    }

    /// Make every write touching `enrollment_id` fail with a database error.
    pub fn fail_writes_for(&self, enrollment_id: &str) {
        self.failing_writes.lock().unwrap().insert(enrollment_id.to_string());
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn find(&self, student_id: &str, enrollment_id: &str) -> Option<Enrollment> {
        self.enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_id == student_id && e.id == enrollment_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.enrollments.lock().unwrap().len()
    }

    fn check_read(&self) -> DomainResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AcademyError::Database("enrollment read failed".into()));
        }
        Ok(())
    }

    fn with_enrollment<T>(
        &self,
        reference: &EnrollmentRef,
        f: impl FnOnce(&mut Vec<Enrollment>, usize) -> T,
    ) -> DomainResult<T> {
        if self.failing_writes.lock().unwrap().contains(&reference.enrollment_id) {
            return Err(AcademyError::Database(format!("write to {reference} rejected")));
        }

        let mut enrollments = self.enrollments.lock().unwrap();
        let index = enrollments
            .iter()
            .position(|e| e.student_id == reference.student_id && e.id == reference.enrollment_id)
            .ok_or_else(|| AcademyError::NotFound(format!("enrollment {reference}")))?;

        let value = f(&mut enrollments, index);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }
}

#[async_trait]
impl EnrollmentStore for InMemoryEnrollmentStore {
    async fn list_for_student(&self, student_id: &str) -> DomainResult<Vec<Enrollment>> {
        self.check_read()?;
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self, subject: Option<Subject>) -> DomainResult<Vec<Enrollment>> {
        self.check_read()?;
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| subject.map_or(true, |s| e.subject == s))
            .cloned()
            .collect())
    }

    async fn get(&self, reference: &EnrollmentRef) -> DomainResult<Enrollment> {
        self.check_read()?;
        self.find(&reference.student_id, &reference.enrollment_id)
            .ok_or_else(|| AcademyError::NotFound(format!("enrollment {reference}")))
    }

    async fn update_class_name(
        &self,
        reference: &EnrollmentRef,
        class_name: &str,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.with_enrollment(reference, |enrollments, index| {
            enrollments[index].class_name = class_name.to_string();
            enrollments[index].updated_at = Some(updated_at);
        })
    }

    async fn update_on_hold(&self, reference: &EnrollmentRef, on_hold: bool) -> DomainResult<()> {
        self.with_enrollment(reference, |enrollments, index| {
            enrollments[index].on_hold = on_hold;
        })
    }

    async fn delete(&self, reference: &EnrollmentRef) -> DomainResult<()> {
        self.with_enrollment(reference, |enrollments, index| {
            enrollments.remove(index);
        })
    }
}

/// Fixed catalog snapshot.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    entries: Vec<ClassCatalogEntry>,
}

impl InMemoryCatalogStore {
    pub fn new(entries: &[(Subject, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(subject, name)| ClassCatalogEntry::new(*subject, *name))
                .collect(),
        }
    }
}

#[async_trait]
impl ClassCatalogStore for InMemoryCatalogStore {
    async fn list_active_classes(&self) -> DomainResult<ClassCatalog> {
        Ok(ClassCatalog::new(self.entries.clone()))
    }
}

/// Student store with per-student read failures and write counting.
#[derive(Default)]
pub struct InMemoryStudentStore {
    students: Mutex<Vec<StudentRecord>>,
    failing_reads: Mutex<HashSet<String>>,
    fail_status_writes: AtomicBool,
    status_writes: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl InMemoryStudentStore {
    pub fn new(students: &[(&str, &str, StudentStatus)]) -> Self {
        Self {
            students: Mutex::new(
                students
                    .iter()
                    .map(|(id, name, status)| StudentRecord {
                        id: (*id).to_string(),
                        name: (*name).to_string(),
                        status: *status,
                    })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn fail_reads_for(&self, student_id: &str) {
        self.failing_reads.lock().unwrap().insert(student_id.to_string());
    }

    pub fn fail_status_writes(&self) {
        self.fail_status_writes.store(true, Ordering::SeqCst);
    }

    pub fn status_write_count(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }

    /// Highest number of overlapping `get_student` calls observed.
    pub fn peak_lookups_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn status_of(&self, student_id: &str) -> Option<StudentStatus> {
        self.students.lock().unwrap().iter().find(|s| s.id == student_id).map(|s| s.status)
    }

    fn check_read(&self, student_id: &str) -> DomainResult<()> {
        if self.failing_reads.lock().unwrap().contains(student_id) {
            return Err(AcademyError::Database(format!("student {student_id} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn get_student(&self, student_id: &str) -> DomainResult<Option<StudentRecord>> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.check_read(student_id)?;
        Ok(self.students.lock().unwrap().iter().find(|s| s.id == student_id).cloned())
    }

    async fn get_status(&self, student_id: &str) -> DomainResult<Option<StudentStatus>> {
        self.check_read(student_id)?;
        Ok(self.status_of(student_id))
    }

    async fn update_status(&self, student_id: &str, status: StudentStatus) -> DomainResult<()> {
        if self.fail_status_writes.load(Ordering::SeqCst) {
            return Err(AcademyError::Database("status write rejected".into()));
        }

        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == student_id) {
            Some(student) => student.status = status,
            None => students.push(StudentRecord {
                id: student_id.to_string(),
                name: String::new(),
                status,
            }),
        }
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_student_ids(&self) -> DomainResult<Vec<String>> {
        Ok(self.students.lock().unwrap().iter().map(|s| s.id.clone()).collect())
    }
}
