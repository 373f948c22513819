use uuid::Uuid;

use crate::domain::member::MEMBER_COLORS;
use crate::domain::{Group, Member};

use super::{ServiceError, ServiceResult};

pub struct MemberService;

impl MemberService {
    /// Adds a member, assigning the next palette color.
    pub fn add(group: &mut Group, name: &str) -> ServiceResult<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Member name cannot be empty".into()));
        }
        Self::validate_name(group, None, name)?;
        let color = MEMBER_COLORS[group.members.len() % MEMBER_COLORS.len()];
        let member = Member::new(name).with_color(color);
        Ok(group.add_member(member))
    }

    pub fn rename(group: &mut Group, id: Uuid, new_name: &str) -> ServiceResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ServiceError::Invalid("Member name cannot be empty".into()));
        }
        Self::validate_name(group, Some(id), new_name)?;
        let member = group
            .member_mut(id)
            .ok_or_else(|| ServiceError::NotFound("Member not found".into()))?;
        member.name = new_name.to_string();
        group.touch();
        Ok(())
    }

    /// Removes a member that is not referenced by any expense or payment.
    pub fn remove(group: &mut Group, id: Uuid) -> ServiceResult<()> {
        if group.member(id).is_none() {
            return Err(ServiceError::NotFound("Member not found".into()));
        }
        if group.expenses.iter().any(|expense| expense.involves(id)) {
            return Err(ServiceError::Conflict(
                "Member has linked expenses or splits".into(),
            ));
        }
        if group.payments.iter().any(|payment| payment.involves(id)) {
            return Err(ServiceError::Conflict("Member has linked payments".into()));
        }
        group.members.retain(|member| member.id != id);
        group.touch();
        Ok(())
    }

    pub fn list(group: &Group) -> Vec<&Member> {
        group.members.iter().collect()
    }

    /// Resolves a member by name or reports which name was unknown.
    pub fn resolve(group: &Group, name: &str) -> ServiceResult<Uuid> {
        group
            .member_by_name(name)
            .map(|member| member.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Member `{}` not found", name.trim())))
    }

    fn validate_name(group: &Group, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = group.members.iter().any(|member| {
            let name = member.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| member.id != id)
        });
        if duplicate {
            Err(ServiceError::Conflict(format!(
                "Member `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}
