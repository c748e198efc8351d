//! GraphQL document text for every supported operation.
//!
//! Fragments are spliced into the documents at compile time so each document
//! is a single `&'static str`.

macro_rules! user_fragment {
    () => {
        r"
fragment User on User {
  id
  email
  firstName
  lastName
  comment
  gitlabId
}"
    };
}

macro_rules! ssh_key_fragment {
    () => {
        r"
fragment SshKey on SshKey {
  id
  name
  keyValue
  keyType
}"
    };
}

/// Fields selected on `User`.
pub const USER_FRAGMENT: &str = user_fragment!();

/// Fields selected on `SshKey`.
pub const SSH_KEY_FRAGMENT: &str = ssh_key_fragment!();

/// `addUser` mutation.
pub const ADD_USER: &str = concat!(
    r"
mutation ($email: String!, $firstName: String, $lastName: String, $comment: String, $gitlabId: Int) {
  addUser(input: {
    email: $email
    firstName: $firstName
    lastName: $lastName
    comment: $comment
    gitlabId: $gitlabId
  }) {
    ...User
  }
}",
    user_fragment!()
);

/// `updateUser` mutation.
pub const UPDATE_USER: &str = concat!(
    r"
mutation ($email: String!, $patch: UpdateUserPatchInput!) {
  updateUser(input: {
    user: {
      email: $email
    }
    patch: $patch
  }) {
    ...User
  }
}",
    user_fragment!()
);

/// `deleteUser` mutation. The server answers with a scalar status.
pub const DELETE_USER: &str = r"
mutation ($email: String!) {
  deleteUser(input: {
    user: {
      email: $email
    }
  })
}";

/// `userBySshKey` query.
pub const USER_BY_SSH_KEY: &str = concat!(
    r"
query userBySshKey($sshKey: String!) {
  userBySshKey(sshKey: $sshKey) {
    ...User
  }
}",
    user_fragment!()
);

/// `addSshKey` mutation.
pub const ADD_SSH_KEY: &str = concat!(
    r"
mutation ($id: Int, $name: String!, $keyValue: String!, $keyType: SshKeyType!, $userEmail: String!) {
  addSshKey(input: {
    id: $id
    name: $name
    keyValue: $keyValue
    keyType: $keyType
    user: {
      email: $userEmail
    }
  }) {
    ...SshKey
  }
}",
    ssh_key_fragment!()
);

/// `deleteSshKey` mutation. The server answers with a scalar status.
pub const DELETE_SSH_KEY: &str = r"
mutation ($name: String!) {
  deleteSshKey(input: {
    name: $name
  })
}";
