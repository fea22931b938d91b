//! Solidity ABI of the target account as seen by the key manager.

use alloy_sol_types::sol;

sol! {
    interface IERC725X {
        function execute(uint256 operationType, address target, uint256 value, bytes data)
            external
            payable
            returns (bytes);
        function executeBatch(
            uint256[] operationsType,
            address[] targets,
            uint256[] values,
            bytes[] datas
        ) external payable returns (bytes[]);
    }

    interface IERC725Y {
        function getData(bytes32 dataKey) external view returns (bytes dataValue);
        function getDataBatch(bytes32[] dataKeys) external view returns (bytes[] dataValues);
        function setData(bytes32 dataKey, bytes dataValue) external payable;
        function setDataBatch(bytes32[] dataKeys, bytes[] dataValues) external payable;
    }

    interface ILSP14 {
        function owner() external view returns (address);
        function pendingOwner() external view returns (address);
        function transferOwnership(address newOwner) external;
        function acceptOwnership() external;
        function renounceOwnership() external;
    }

    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    /// Raised by the target when a renounce confirmation lands outside its window.
    error NotInRenounceOwnershipInterval(uint256 renounceOwnershipStart, uint256 renounceOwnershipEnd);
    error ERC725X_InsufficientBalance(uint256 balance, uint256 value);
    error ERC725X_MsgValueDisallowedInStaticCall();
}
